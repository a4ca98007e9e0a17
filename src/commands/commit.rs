//! # Commit Command — Snapshot Engine
//!
//! Builds a commit directly from the index's `path -> fingerprint` map
//! (there is no intermediate tree-building pass — the map *is* the
//! commit's tree, since paths are tracked flat). Fails `EmptyIndex` if
//! nothing is staged, and `DetachedCommit` if HEAD is detached (Open
//! Question 1, resolved in DESIGN.md: commits on detached HEAD are
//! forbidden).

use std::env;

use anyhow::Result;

use crate::error::MinigitError;
use crate::index::Index;
use crate::objects::commit::Author;
use crate::objects::Commit;
use crate::refs::{self, HeadState};
use crate::store;
use crate::Repository;

fn resolve_author() -> Author {
    let name = env::var("MINIGIT_AUTHOR_NAME")
        .or_else(|_| env::var("USER"))
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "Unknown".to_string());

    let email = env::var("MINIGIT_AUTHOR_EMAIL")
        .unwrap_or_else(|_| format!("{}@localhost", name.to_lowercase().replace(' ', ".")));

    Author::now(&name, &email)
}

pub fn run(message: &str) -> Result<()> {
    let repo = Repository::find()?;
    let index_path = repo.index_path();

    let index = Index::load(&index_path)?;
    if index.is_empty() {
        return Err(MinigitError::EmptyIndex.into());
    }

    let branch = match refs::head_read(&repo)? {
        HeadState::Detached(_) => return Err(MinigitError::DetachedCommit.into()),
        HeadState::Attached(name) => name,
        HeadState::Unborn => refs::current_branch(&repo)?.unwrap_or_else(|| crate::DEFAULT_BRANCH.to_string()),
    };

    let parents = match refs::resolve_head_commit(&repo)? {
        Some(commit) => vec![commit],
        None => Vec::new(),
    };

    let author = resolve_author();
    let tree = index.entries().map(|(p, f)| (p.clone(), f.clone())).collect();
    let entry_count = tree.len();
    let commit = Commit::new(tree, parents, author.clone(), author, message.to_string());

    let commit_hash = store::put_commit(&repo, &commit)?;
    refs::branch_write(&repo, &branch, &commit_hash)?;

    Index::new().save(&index_path)?;

    let short_hash = &commit_hash[..7.min(commit_hash.len())];
    println!("[{} {}] {}", branch, short_hash, message);
    println!(" {} file(s) changed", entry_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn init_repo_and_chdir() -> (tempfile::TempDir, Repository) {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        (temp, repo)
    }

    #[test]
    fn commit_with_empty_index_fails() {
        let (_temp, _repo) = init_repo_and_chdir();
        let err = run("nothing staged").unwrap_err();
        assert!(matches!(err.downcast_ref::<MinigitError>(), Some(MinigitError::EmptyIndex)));
    }

    #[test]
    fn commit_clears_index_and_updates_branch() {
        let (_temp, repo) = init_repo_and_chdir();

        std::fs::write("a.txt", b"hello\n").unwrap();
        crate::commands::add::run(vec!["a.txt".to_string()]).unwrap();

        run("first").unwrap();

        let index = Index::load(&repo.index_path()).unwrap();
        assert!(index.is_empty());

        let head_commit = refs::resolve_head_commit(&repo).unwrap().unwrap();
        let commit = store::get_commit(&repo, &head_commit).unwrap();
        assert_eq!(commit.message, "first");
        assert!(commit.is_initial());
        assert_eq!(commit.tree.get("a.txt").map(String::as_str), Some(store::put_blob(&repo, b"hello\n").unwrap().as_str()));
    }

    #[test]
    fn second_commit_has_first_as_parent() {
        let (_temp, repo) = init_repo_and_chdir();

        std::fs::write("a.txt", b"hello\n").unwrap();
        crate::commands::add::run(vec!["a.txt".to_string()]).unwrap();
        run("first").unwrap();
        let first_hash = refs::resolve_head_commit(&repo).unwrap().unwrap();

        std::fs::write("a.txt", b"hello2\n").unwrap();
        crate::commands::add::run(vec!["a.txt".to_string()]).unwrap();
        run("second").unwrap();
        let second_hash = refs::resolve_head_commit(&repo).unwrap().unwrap();

        let second_commit = store::get_commit(&repo, &second_hash).unwrap();
        assert_eq!(second_commit.parents, vec![first_hash]);
    }

    #[test]
    fn commit_on_detached_head_is_forbidden() {
        let (_temp, repo) = init_repo_and_chdir();

        std::fs::write("a.txt", b"hello\n").unwrap();
        crate::commands::add::run(vec!["a.txt".to_string()]).unwrap();
        run("first").unwrap();
        let first_hash = refs::resolve_head_commit(&repo).unwrap().unwrap();

        refs::head_write_detached(&repo, &first_hash).unwrap();

        std::fs::write("b.txt", b"world\n").unwrap();
        crate::commands::add::run(vec!["b.txt".to_string()]).unwrap();

        let err = run("second").unwrap_err();
        assert!(matches!(err.downcast_ref::<MinigitError>(), Some(MinigitError::DetachedCommit)));
    }
}
