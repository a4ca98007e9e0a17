//! # Checkout Command — Checkout Engine
//!
//! Switch HEAD to a branch or a commit fingerprint and materialize that
//! commit's flat tree map into the working directory. Untracked files
//! are left alone (Open Question 2, resolved in DESIGN.md); there is no
//! single-file checkout, since the spec's CLI surface has no `-- <path>`
//! form.

use std::fs;

use anyhow::{Context, Result};

use crate::error::MinigitError;
use crate::objects::Commit;
use crate::refs;
use crate::store;
use crate::Repository;

fn resolve_target(repo: &Repository, target: &str) -> Result<String> {
    if let Some(commit) = refs::branch_read(repo, target)? {
        return Ok(commit);
    }

    if target.len() == 40 && target.chars().all(|c| c.is_ascii_hexdigit()) && store::object_exists(repo, target) {
        return Ok(target.to_string());
    }

    Err(MinigitError::UnknownTarget(target.to_string()).into())
}

fn materialize(repo: &Repository, commit: &Commit) -> Result<()> {
    for (path, fingerprint) in &commit.tree {
        let content = store::get_blob(repo, fingerprint)?;
        let dest = repo.root.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).context(format!("Failed to create directory for {}", path))?;
        }
        fs::write(&dest, &content).context(format!("Failed to write {}", path))?;
    }
    Ok(())
}

pub fn run(target: &str) -> Result<()> {
    let repo = Repository::find()?;

    let commit_hash = resolve_target(&repo, target)?;
    let commit = store::get_commit(&repo, &commit_hash)?;

    materialize(&repo, &commit)?;

    if refs::branch_exists(&repo, target) {
        refs::head_write_attached(&repo, target)?;
        println!("Switched to branch '{}'", target);
    } else {
        refs::head_write_detached(&repo, &commit_hash)?;
        println!("Note: checking out '{}'.", &commit_hash[..7.min(commit_hash.len())]);
        println!("You are in 'detached HEAD' state.");
    }

    Ok(())
}
