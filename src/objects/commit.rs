//! # Commit Object
//!
//! A commit is an immutable snapshot: a flat `path -> blob fingerprint`
//! tree map, an ordered parent list (0 for the root commit, 1 for a
//! normal commit, 2 for a merge), author/committer identity, a message,
//! and a local timestamp.
//!
//! ## Format
//!
//! ```text
//! tree
//! blob <fingerprint> <path>
//! blob <fingerprint> <path>
//! ...
//! parent <fingerprint>
//! author <name> <email> <YYYY-MM-DD HH:MM:SS>
//! committer <name> <email> <YYYY-MM-DD HH:MM:SS>
//!
//! <commit message, to end of file>
//! ```
//!
//! Unlike git, there is no separate tree object: the tree map is inlined
//! directly into the commit text, since this core only ever tracks flat
//! paths (no directory objects).

use std::collections::BTreeMap;

use chrono::Local;

use crate::error::MinigitError;

/// An author or committer identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    pub timestamp: String,
}

impl Author {
    /// Build an author stamped with the current local time.
    pub fn now(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Build an author with an explicit timestamp (used by tests and by
    /// round-tripping a parsed commit).
    pub fn with_timestamp(name: &str, email: &str, timestamp: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// `Name <email> YYYY-MM-DD HH:MM:SS`
    pub fn serialize(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.timestamp)
    }

    pub fn parse(s: &str) -> Result<Self, MinigitError> {
        let malformed = |why: &str| MinigitError::MalformedObject("author".into(), why.into());

        let email_start = s.find('<').ok_or_else(|| malformed("no email start"))?;
        let email_end = s.find('>').ok_or_else(|| malformed("no email end"))?;

        let name = s[..email_start].trim().to_string();
        let email = s[email_start + 1..email_end].to_string();
        let timestamp = s[email_end + 1..].trim().to_string();

        if timestamp.is_empty() {
            return Err(malformed("missing timestamp"));
        }

        Ok(Self { name, email, timestamp })
    }
}

/// An immutable commit record.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// `path -> blob fingerprint`, flat (no directory objects).
    pub tree: BTreeMap<String, String>,
    /// Parent commit fingerprints, in order.
    pub parents: Vec<String>,
    pub author: Author,
    pub committer: Author,
    pub message: String,
}

impl Commit {
    pub fn new(
        tree: BTreeMap<String, String>,
        parents: Vec<String>,
        author: Author,
        committer: Author,
        message: String,
    ) -> Self {
        Self { tree, parents, author, committer, message }
    }

    pub fn is_initial(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    pub fn serialize(&self) -> String {
        let mut lines = Vec::new();

        lines.push("tree".to_string());
        for (path, fingerprint) in &self.tree {
            lines.push(format!("blob {} {}", fingerprint, path));
        }
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.serialize()));
        lines.push(format!("committer {}", self.committer.serialize()));
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }

    pub fn parse(content: &str) -> Result<Self, MinigitError> {
        let malformed = |why: String| MinigitError::MalformedObject("commit".into(), why);

        let mut lines = content.lines();
        match lines.next() {
            Some("tree") => {}
            Some(other) => return Err(malformed(format!("expected 'tree', got '{other}'"))),
            None => return Err(malformed("empty commit object".into())),
        }

        let mut tree = BTreeMap::new();
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(rest) = line.strip_prefix("blob ") {
                let mut parts = rest.splitn(2, ' ');
                let fp = parts
                    .next()
                    .ok_or_else(|| malformed("blob line missing fingerprint".into()))?;
                let path = parts
                    .next()
                    .ok_or_else(|| malformed("blob line missing path".into()))?;
                tree.insert(path.to_string(), fp.to_string());
            } else if let Some(p) = line.strip_prefix("parent ") {
                parents.push(p.to_string());
            } else if let Some(rest) = line.strip_prefix("author ") {
                author = Some(Author::parse(rest)?);
            } else if let Some(rest) = line.strip_prefix("committer ") {
                committer = Some(Author::parse(rest)?);
            } else {
                return Err(malformed(format!("unexpected header line: '{line}'")));
            }
        }

        let message = lines.collect::<Vec<_>>().join("\n");

        Ok(Self {
            tree,
            parents,
            author: author.ok_or_else(|| malformed("missing author".into()))?,
            committer: committer.ok_or_else(|| malformed("missing committer".into()))?,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_roundtrip() {
        let author = Author::with_timestamp("Test", "test@test.com", "2024-01-02 03:04:05");
        let parsed = Author::parse(&author.serialize()).unwrap();
        assert_eq!(author, parsed);
    }

    #[test]
    fn commit_roundtrip() {
        let author = Author::with_timestamp("Test", "test@test.com", "2024-01-02 03:04:05");
        let mut tree = BTreeMap::new();
        tree.insert("a.txt".to_string(), "a".repeat(40));
        tree.insert("b.txt".to_string(), "b".repeat(40));

        let commit = Commit::new(tree.clone(), vec!["p".repeat(40)], author.clone(), author, "hello\nworld".to_string());

        let parsed = Commit::parse(&commit.serialize()).unwrap();
        assert_eq!(parsed.tree, tree);
        assert_eq!(parsed.parents, vec!["p".repeat(40)]);
        assert_eq!(parsed.message, "hello\nworld");
    }

    #[test]
    fn initial_commit_has_no_parents() {
        let author = Author::now("a", "a@a.com");
        let commit = Commit::new(BTreeMap::new(), vec![], author.clone(), author, "root".to_string());
        assert!(commit.is_initial());
        assert!(!commit.is_merge());
    }

    #[test]
    fn merge_commit_has_two_parents() {
        let author = Author::now("a", "a@a.com");
        let commit = Commit::new(
            BTreeMap::new(),
            vec!["a".repeat(40), "b".repeat(40)],
            author.clone(),
            author,
            "merge".to_string(),
        );
        assert!(commit.is_merge());
    }

    #[test]
    fn message_may_contain_blank_lines() {
        let author = Author::with_timestamp("Test", "test@test.com", "2024-01-02 03:04:05");
        let commit = Commit::new(BTreeMap::new(), vec![], author.clone(), author, "line1\n\nline3".to_string());
        let parsed = Commit::parse(&commit.serialize()).unwrap();
        assert_eq!(parsed.message, "line1\n\nline3");
    }
}
