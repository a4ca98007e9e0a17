//! # Commit Graph
//!
//! Ancestry queries over the commit DAG: the full ancestor set of a
//! commit, and a lowest common ancestor (merge base) between two
//! commits. Both are plain reverse-BFS over parent lists, generalized
//! from the visited-set walks the log and graph commands used to do
//! just for printing.

use std::collections::{HashSet, VecDeque};

use crate::error::MinigitError;
use crate::store;
use crate::Repository;

/// All commits reachable from `h` by following parent links, including
/// `h` itself. Terminates even on graphs with shared ancestors because
/// visited commits are never revisited.
pub fn ancestors(repo: &Repository, h: &str) -> Result<HashSet<String>, MinigitError> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(h.to_string());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let commit = store::get_commit(repo, &current)?;
        for parent in &commit.parents {
            if !visited.contains(parent) {
                queue.push_back(parent.clone());
            }
        }
    }

    Ok(visited)
}

/// A common ancestor of `a` and `b`, found by walking `b`'s ancestry and
/// returning the first commit also present in `a`'s ancestor set.
///
/// This yields *a* common ancestor reachable on the shortest path from
/// `b`, not necessarily the unique best merge base in degenerate
/// many-merge topologies — acceptable for this core (spec §4.5).
pub fn lowest_common_ancestor(repo: &Repository, a: &str, b: &str) -> Result<Option<String>, MinigitError> {
    let a_ancestors = ancestors(repo, a)?;

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(b.to_string());

    while let Some(current) = queue.pop_front() {
        if a_ancestors.contains(&current) {
            return Ok(Some(current));
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        let commit = store::get_commit(repo, &current)?;
        for parent in &commit.parents {
            queue.push_back(parent.clone());
        }
    }

    Ok(None)
}
