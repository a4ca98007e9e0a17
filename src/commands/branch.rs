//! # Branch Command
//!
//! List branches, or create one pointing at the current HEAD commit.
//! Deletion is dropped: it isn't part of this core's command surface.

use anyhow::Result;

use crate::error::MinigitError;
use crate::refs::{self, HeadState};
use crate::Repository;

fn list_branches(repo: &Repository) -> Result<()> {
    let current = match refs::head_read(repo)? {
        HeadState::Attached(name) => Some(name),
        HeadState::Detached(_) | HeadState::Unborn => None,
    };

    for branch in refs::list_branches(repo)? {
        if current.as_deref() == Some(branch.as_str()) {
            println!("* {}", branch);
        } else {
            println!("  {}", branch);
        }
    }

    Ok(())
}

fn create_branch(repo: &Repository, name: &str) -> Result<()> {
    if refs::branch_exists(repo, name) {
        return Err(MinigitError::BranchExists(name.to_string()).into());
    }

    let commit = refs::resolve_head_commit(repo)?.ok_or(MinigitError::NoCommits)?;
    refs::branch_write(repo, name, &commit)?;

    println!("Created branch '{}'", name);
    Ok(())
}

pub fn run(name: Option<String>) -> Result<()> {
    let repo = Repository::find()?;

    match name {
        Some(name) => create_branch(&repo, &name),
        None => list_branches(&repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_branch_points_at_head_commit() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let commit = "a".repeat(40);
        refs::branch_write(&repo, "main", &commit).unwrap();

        run(Some("feature".to_string())).unwrap();

        assert_eq!(refs::branch_read(&repo, "feature").unwrap(), Some(commit));
    }

    #[test]
    fn duplicate_branch_name_fails() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let commit = "a".repeat(40);
        refs::branch_write(&repo, "main", &commit).unwrap();
        refs::branch_write(&repo, "feature", &commit).unwrap();

        let err = create_branch(&repo, "feature").unwrap_err();
        assert!(matches!(err.downcast_ref::<MinigitError>(), Some(MinigitError::BranchExists(_))));
    }

    #[test]
    fn create_branch_before_first_commit_fails() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let err = create_branch(&repo, "feature").unwrap_err();
        assert!(matches!(err.downcast_ref::<MinigitError>(), Some(MinigitError::NoCommits)));
    }

    #[test]
    fn listing_marks_current_branch() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let commit = "a".repeat(40);
        refs::branch_write(&repo, "main", &commit).unwrap();
        refs::head_write_attached(&repo, "main").unwrap();

        list_branches(&repo).unwrap();
    }
}
