//! # Reference Store
//!
//! Owns `HEAD` and `refs/heads/<name>`. HEAD is either attached to a
//! branch by name (`ref: refs/heads/<name>\n`), detached onto a commit
//! fingerprint directly, or unborn (attached to a branch whose ref file
//! does not yet exist — only possible between `init` and the first
//! commit).
//!
//! This consolidates the `read_head`/`get_current_branch`/`branch_ref_path`
//! helpers that used to be duplicated across the log, branch, and
//! checkout commands into the single component the design calls for;
//! the on-disk convention is unchanged.

use std::fs;

use crate::error::MinigitError;
use crate::Repository;

/// The three states HEAD can be in.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadState {
    /// HEAD points at a branch by name, and that branch has a commit.
    Attached(String),
    /// HEAD points directly at a commit fingerprint.
    Detached(String),
    /// HEAD points at a branch whose ref file is empty or missing.
    Unborn,
}

fn branch_path(repo: &Repository, name: &str) -> std::path::PathBuf {
    repo.refs_dir().join("heads").join(name)
}

/// Read HEAD and resolve it into a `HeadState`.
pub fn head_read(repo: &Repository) -> Result<HeadState, MinigitError> {
    let head_path = repo.head_path();
    let content = fs::read_to_string(&head_path)
        .map_err(|_| MinigitError::NotARepository)?;
    let content = content.trim();

    if let Some(name) = content.strip_prefix("ref: refs/heads/") {
        let name = name.trim().to_string();
        match branch_read(repo, &name)? {
            Some(_) => Ok(HeadState::Attached(name)),
            None => Ok(HeadState::Unborn),
        }
    } else if content.is_empty() {
        Ok(HeadState::Unborn)
    } else {
        Ok(HeadState::Detached(content.to_string()))
    }
}

/// Attach HEAD to a branch by name. Does not touch the branch's commit.
pub fn head_write_attached(repo: &Repository, branch: &str) -> Result<(), MinigitError> {
    fs::write(repo.head_path(), format!("ref: refs/heads/{branch}\n"))
        .map_err(|e| MinigitError::MalformedObject("HEAD".into(), e.to_string()))
}

/// Detach HEAD directly onto a commit fingerprint.
pub fn head_write_detached(repo: &Repository, commit: &str) -> Result<(), MinigitError> {
    fs::write(repo.head_path(), format!("{commit}\n"))
        .map_err(|e| MinigitError::MalformedObject("HEAD".into(), e.to_string()))
}

/// The branch name HEAD is attached to, or `None` if HEAD is detached
/// or unborn-without-a-name (should not happen in practice).
pub fn current_branch(repo: &Repository) -> Result<Option<String>, MinigitError> {
    let content = fs::read_to_string(repo.head_path())
        .map_err(|_| MinigitError::NotARepository)?;
    let content = content.trim();
    Ok(content.strip_prefix("ref: refs/heads/").map(|s| s.trim().to_string()))
}

/// The commit a branch points to, or `None` if the branch has no
/// commits yet (an empty or missing ref file — only valid pre-commit).
pub fn branch_read(repo: &Repository, name: &str) -> Result<Option<String>, MinigitError> {
    let path = branch_path(repo, name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .map_err(|e| MinigitError::MalformedObject(name.into(), e.to_string()))?;
    let content = content.trim();
    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content.to_string()))
    }
}

/// Point a branch at a commit fingerprint, creating the ref file if needed.
pub fn branch_write(repo: &Repository, name: &str, commit: &str) -> Result<(), MinigitError> {
    let path = branch_path(repo, name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MinigitError::MalformedObject(name.into(), e.to_string()))?;
    }
    fs::write(&path, format!("{commit}\n")).map_err(|e| MinigitError::MalformedObject(name.into(), e.to_string()))
}

/// Whether a branch ref file exists at all (empty or not).
pub fn branch_exists(repo: &Repository, name: &str) -> bool {
    branch_path(repo, name).exists()
}

/// List all branch names, sorted.
pub fn list_branches(repo: &Repository) -> Result<Vec<String>, MinigitError> {
    let heads_dir = repo.refs_dir().join("heads");
    if !heads_dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&heads_dir).map_err(|_| MinigitError::NotARepository)? {
        let entry = entry.map_err(|_| MinigitError::NotARepository)?;
        if entry.path().is_file() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Combine `head_read` with a branch lookup to get HEAD's commit, if any.
///
/// Returns `None` only in the Unborn state.
pub fn resolve_head_commit(repo: &Repository) -> Result<Option<String>, MinigitError> {
    match head_read(repo)? {
        HeadState::Attached(name) => branch_read(repo, &name),
        HeadState::Detached(commit) => Ok(Some(commit)),
        HeadState::Unborn => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fresh_repo_is_unborn() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        assert_eq!(head_read(&repo).unwrap(), HeadState::Unborn);
        assert_eq!(resolve_head_commit(&repo).unwrap(), None);
    }

    #[test]
    fn attached_after_branch_write() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let commit = "a".repeat(40);
        branch_write(&repo, "main", &commit).unwrap();

        assert_eq!(head_read(&repo).unwrap(), HeadState::Attached("main".to_string()));
        assert_eq!(resolve_head_commit(&repo).unwrap(), Some(commit));
    }

    #[test]
    fn detach_onto_commit() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let commit = "b".repeat(40);
        head_write_detached(&repo, &commit).unwrap();

        assert_eq!(head_read(&repo).unwrap(), HeadState::Detached(commit.clone()));
        assert_eq!(resolve_head_commit(&repo).unwrap(), Some(commit));
        assert_eq!(current_branch(&repo).unwrap(), None);
    }

    #[test]
    fn branch_listing_is_sorted() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        branch_write(&repo, "zeta", &"a".repeat(40)).unwrap();
        branch_write(&repo, "alpha", &"b".repeat(40)).unwrap();

        assert_eq!(list_branches(&repo).unwrap(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
