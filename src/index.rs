//! # Index (Staging Area)
//!
//! A finite mapping `path -> blob fingerprint`, persisted as one
//! `<path> <fingerprint>` line per entry. Paths are whitespace-free for
//! this core, so a single space unambiguously separates the two fields.
//!
//! This replaces the JSON+size+mtime format the teacher project used:
//! the wire format here is mandated by the design (a plain text line per
//! entry), not an incidental implementation choice.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// The staging area: every fingerprint in it is guaranteed (by
/// construction — `add` always stores the blob first) to exist in the
/// object store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    entries: BTreeMap<String, String>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from disk. A missing file is an empty index.
    pub fn load(index_path: &Path) -> Result<Self> {
        if !index_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(index_path).context("Failed to read index file")?;
        let mut entries = BTreeMap::new();

        for (lineno, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let (path, fingerprint) = line
                .split_once(' ')
                .with_context(|| format!("malformed index line {}: '{}'", lineno + 1, line))?;
            entries.insert(path.to_string(), fingerprint.to_string());
        }

        Ok(Self { entries })
    }

    /// Persist the index to disk, one `path fingerprint` line per entry.
    pub fn save(&self, index_path: &Path) -> Result<()> {
        let mut content = String::new();
        for (path, fingerprint) in &self.entries {
            content.push_str(path);
            content.push(' ');
            content.push_str(fingerprint);
            content.push('\n');
        }
        fs::write(index_path, content).context("Failed to write index file")
    }

    pub fn add_entry(&mut self, path: String, fingerprint: String) {
        self.entries.insert(path, fingerprint);
    }

    pub fn get(&self, path: &str) -> Option<&String> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Consume the index into its `path -> fingerprint` map, for
    /// building a commit's tree directly.
    pub fn into_tree(self) -> BTreeMap<String, String> {
        self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_index_is_empty() {
        assert!(Index::new().is_empty());
    }

    #[test]
    fn add_then_get() {
        let mut index = Index::new();
        index.add_entry("test.txt".to_string(), "abc123".to_string());
        assert_eq!(index.get("test.txt"), Some(&"abc123".to_string()));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let index_path = temp.path().join("index");

        let mut index = Index::new();
        index.add_entry("test.txt".to_string(), "abc123".to_string());
        index.add_entry("dir/nested.txt".to_string(), "def456".to_string());
        index.save(&index_path).unwrap();

        let loaded = Index::load(&index_path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempdir().unwrap();
        let index = Index::load(&temp.path().join("nonexistent")).unwrap();
        assert!(index.is_empty());
    }
}
