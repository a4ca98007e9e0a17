//! # Init Command
//!
//! Creates the `.minigit` directory structure. Re-running `init` inside
//! an already-initialized repository is reported, not fatal (spec §7).

use std::path::Path;

use anyhow::Result;

use crate::error::MinigitError;
use crate::Repository;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target = path.unwrap_or(Path::new("."));

    match Repository::init(target) {
        Ok(repo) => {
            println!("Initialized empty minigit repository in {}", repo.minigit_dir.display());
            Ok(())
        }
        Err(e) if matches!(e.downcast_ref::<MinigitError>(), Some(MinigitError::AlreadyInitialized)) => {
            println!("Reinitialized existing minigit repository in {}", target.join(crate::MINIGIT_DIR).display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_command_creates_repository() {
        let temp = tempdir().unwrap();
        run(Some(temp.path())).unwrap();

        assert!(temp.path().join(".minigit").exists());
        assert!(temp.path().join(".minigit/objects").exists());
        assert!(temp.path().join(".minigit/refs/heads").exists());

        let head = std::fs::read_to_string(temp.path().join(".minigit/HEAD")).unwrap();
        assert_eq!(head, "ref: refs/heads/main\n");
    }

    #[test]
    fn init_twice_does_not_fail() {
        let temp = tempdir().unwrap();
        run(Some(temp.path())).unwrap();
        run(Some(temp.path())).unwrap();
    }
}
