//! # Merge Command — Merge Engine
//!
//! Three-way merge of a target branch into HEAD: compute the merge base
//! with [`crate::graph::lowest_common_ancestor`], reconcile every path
//! that appears in the base, our tree, or their tree, materialize the
//! result (conflict markers for paths that collide), and commit if
//! nothing conflicted.

use std::collections::BTreeSet;
use std::fs;

use anyhow::{Context, Result};

use crate::error::MinigitError;
use crate::graph;
use crate::objects::commit::Author;
use crate::objects::Commit;
use crate::refs::{self, HeadState};
use crate::store;
use crate::Repository;

enum Reconciled {
    Take(String),
    Delete,
    Conflict { ours: Option<String>, theirs: Option<String> },
}

/// The §4.8 three-way reconciliation table: `l`/`c`/`t` are the base,
/// ours, and theirs fingerprints for one path, `None` standing for
/// absent.
fn reconcile(l: Option<&str>, c: Option<&str>, t: Option<&str>) -> Reconciled {
    match (l, c, t) {
        (None, None, Some(x)) => Reconciled::Take(x.to_string()),
        (None, Some(x), None) => Reconciled::Take(x.to_string()),
        (None, Some(x), Some(y)) if x == y => Reconciled::Take(x.to_string()),
        (None, Some(_), Some(_)) => Reconciled::Conflict { ours: c.map(String::from), theirs: t.map(String::from) },
        (Some(x), Some(cc), Some(tt)) if cc == x && tt == x => Reconciled::Take(x.to_string()),
        (Some(x), Some(cc), Some(tt)) if cc == x && tt != x => Reconciled::Take(tt.to_string()),
        (Some(x), Some(cc), Some(tt)) if cc != x && tt == x => Reconciled::Take(cc.to_string()),
        (Some(x), None, Some(tt)) if tt == x => Reconciled::Delete,
        (Some(x), Some(cc), None) if cc == x => Reconciled::Delete,
        (Some(_), None, None) => Reconciled::Delete,
        (Some(x), None, Some(_)) => {
            let _ = x;
            Reconciled::Conflict { ours: None, theirs: t.map(String::from) }
        }
        (Some(x), Some(_), None) => {
            let _ = x;
            Reconciled::Conflict { ours: c.map(String::from), theirs: None }
        }
        (Some(_), Some(cc), Some(tt)) if cc == tt => Reconciled::Take(cc.to_string()),
        (Some(_), Some(_), Some(_)) => Reconciled::Conflict { ours: c.map(String::from), theirs: t.map(String::from) },
        (None, None, None) => Reconciled::Delete,
    }
}

fn write_conflict_marker(repo: &Repository, path: &str, ours: Option<&str>, theirs: Option<&str>) -> Result<()> {
    let ours_content = match ours {
        Some(fp) => store::get_blob(repo, fp)?,
        None => Vec::new(),
    };
    let theirs_content = match theirs {
        Some(fp) => store::get_blob(repo, fp)?,
        None => Vec::new(),
    };

    let mut merged = Vec::new();
    merged.extend_from_slice(b"<<<<<<< OURS\n");
    merged.extend_from_slice(&ours_content);
    merged.extend_from_slice(b"=======\n");
    merged.extend_from_slice(&theirs_content);
    merged.extend_from_slice(b">>>>>>> THEIRS\n");

    write_file(repo, path, &merged)
}

fn write_file(repo: &Repository, path: &str, content: &[u8]) -> Result<()> {
    let dest = repo.root.join(path);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).context(format!("Failed to create directory for {}", path))?;
    }
    fs::write(&dest, content).context(format!("Failed to write {}", path))
}

pub fn run(branch: &str) -> Result<()> {
    let repo = Repository::find()?;

    let ours_hash = refs::resolve_head_commit(&repo)?.ok_or(MinigitError::NoCommits)?;
    let theirs_hash = refs::branch_read(&repo, branch)?.ok_or_else(|| MinigitError::UnknownTarget(branch.to_string()))?;

    if ours_hash == theirs_hash {
        println!("Already up to date.");
        return Ok(());
    }

    let base_hash = graph::lowest_common_ancestor(&repo, &ours_hash, &theirs_hash)?
        .ok_or(MinigitError::NoCommonAncestor)?;
    tracing::debug!(ours = %ours_hash, theirs = %theirs_hash, base = %base_hash, "merge base found");

    let ours = store::get_commit(&repo, &ours_hash)?;
    let theirs = store::get_commit(&repo, &theirs_hash)?;
    let base = store::get_commit(&repo, &base_hash)?;

    let mut paths = BTreeSet::new();
    paths.extend(base.tree.keys().cloned());
    paths.extend(ours.tree.keys().cloned());
    paths.extend(theirs.tree.keys().cloned());

    let mut merged_tree = std::collections::BTreeMap::new();
    let mut conflicted_paths = Vec::new();

    for path in &paths {
        let l = base.tree.get(path).map(String::as_str);
        let c = ours.tree.get(path).map(String::as_str);
        let t = theirs.tree.get(path).map(String::as_str);

        match reconcile(l, c, t) {
            Reconciled::Take(fp) => {
                write_file(&repo, path, &store::get_blob(&repo, &fp)?)?;
                merged_tree.insert(path.clone(), fp);
            }
            Reconciled::Delete => {
                let _ = fs::remove_file(repo.root.join(path));
            }
            Reconciled::Conflict { ours, theirs } => {
                conflicted_paths.push(path.clone());
                write_conflict_marker(&repo, path, ours.as_deref(), theirs.as_deref())?;
            }
        }
    }

    if !conflicted_paths.is_empty() {
        for path in &conflicted_paths {
            println!("CONFLICT (content): Merge conflict in {}", path);
        }
        return Err(MinigitError::MergeConflict.into());
    }

    let current_label = match refs::head_read(&repo)? {
        HeadState::Attached(name) => name,
        HeadState::Detached(hash) => hash,
        HeadState::Unborn => "HEAD".to_string(),
    };

    let author = Author::now("merge", "merge@minigit");
    let commit = Commit::new(
        merged_tree,
        vec![ours_hash.clone(), theirs_hash.clone()],
        author.clone(),
        author,
        format!("Merge branch '{}' into {}", branch, current_label),
    );
    let commit_hash = store::put_commit(&repo, &commit)?;

    match refs::head_read(&repo)? {
        HeadState::Attached(name) => refs::branch_write(&repo, &name, &commit_hash)?,
        HeadState::Detached(_) => refs::head_write_detached(&repo, &commit_hash)?,
        HeadState::Unborn => return Err(MinigitError::NoCommits.into()),
    }

    crate::index::Index::new().save(&repo.index_path())?;

    println!("Merge made by the three-way merge strategy.");
    Ok(())
}
