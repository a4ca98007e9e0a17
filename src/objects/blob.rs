//! # Blob Object
//!
//! A blob is raw file content with no filename or permissions attached.
//! It is addressed purely by `fingerprint("blob", content)`. This is the
//! type `commands::add` stages into the index through.

use anyhow::{Context, Result};

use crate::store;
use crate::Repository;

/// Raw file content, addressed by its fingerprint.
#[derive(Debug, Clone)]
pub struct Blob {
    pub content: Vec<u8>,
}

impl Blob {
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Read a blob's content from a working-tree file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read(path).context(format!("Failed to read file: {}", path.display()))?;
        Ok(Self::new(content))
    }

    /// Store this blob in the repository's object database.
    pub fn store(&self, repo: &Repository) -> Result<String> {
        store::put_blob(repo, &self.content).map_err(Into::into)
    }
}
