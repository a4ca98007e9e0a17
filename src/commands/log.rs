//! # Log Command
//!
//! Print first-parent commit history starting from HEAD. Merge commits
//! are noted with their second parent but the walk never follows it —
//! spec's history view is a single line of first parents, not a full
//! graph traversal.

use std::collections::HashSet;

use anyhow::Result;

use crate::error::MinigitError;
use crate::objects::commit::Commit;
use crate::refs;
use crate::store;
use crate::Repository;

fn format_commit(commit: &Commit, commit_hash: &str, oneline: bool) -> String {
    if oneline {
        let short_hash = &commit_hash[..7.min(commit_hash.len())];
        let message_line = commit.message.lines().next().unwrap_or("");
        format!("{} {}", short_hash, message_line)
    } else {
        let mut lines = Vec::new();
        lines.push(format!("commit {}", commit_hash));

        if commit.is_merge() {
            lines.push(format!(
                "Merge: {} {}",
                &commit.parents[0][..7.min(commit.parents[0].len())],
                &commit.parents[1][..7.min(commit.parents[1].len())]
            ));
        }

        lines.push(format!("Author: {} <{}>", commit.author.name, commit.author.email));
        lines.push(format!("Date:   {}", commit.author.timestamp));
        lines.push(String::new());

        for line in commit.message.lines() {
            lines.push(format!("    {}", line));
        }

        lines.join("\n")
    }
}

fn walk_first_parent(repo: &Repository, start: &str, oneline: bool) -> Result<Vec<String>> {
    let mut output = Vec::new();
    let mut visited = HashSet::new();
    let mut current = start.to_string();

    loop {
        if !visited.insert(current.clone()) {
            break;
        }

        let commit = store::get_commit(repo, &current)?;
        output.push(format_commit(&commit, &current, oneline));

        match commit.parents.first() {
            Some(parent) => current = parent.clone(),
            None => break,
        }
    }

    Ok(output)
}

pub fn run(oneline: bool) -> Result<()> {
    let repo = Repository::find()?;

    let start = match refs::resolve_head_commit(&repo)? {
        Some(hash) => hash,
        None => return Err(MinigitError::NoCommits.into()),
    };

    let commits = walk_first_parent(&repo, &start, oneline)?;

    for (i, line) in commits.iter().enumerate() {
        println!("{}", line);
        if !oneline && i + 1 < commits.len() {
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::commit::Author;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn log_with_no_commits_fails() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let err = run(false).unwrap_err();
        assert!(matches!(err.downcast_ref::<MinigitError>(), Some(MinigitError::NoCommits)));
    }

    #[test]
    fn walk_follows_first_parent_only() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let author = Author::with_timestamp("a", "a@a.com", "2024-01-01 00:00:00");
        let root = Commit::new(BTreeMap::new(), vec![], author.clone(), author.clone(), "root".to_string());
        let root_hash = store::put_commit(&repo, &root).unwrap();

        let second = Commit::new(BTreeMap::new(), vec![root_hash.clone()], author.clone(), author, "second".to_string());
        let second_hash = store::put_commit(&repo, &second).unwrap();

        let lines = walk_first_parent(&repo, &second_hash, true).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("second"));
        assert!(lines[1].contains("root"));
    }
}
