//! # minigit — a minimal content-addressed version control tool
//!
//! minigit records snapshots of user-selected files, organizes them into
//! a directed acyclic history of commits, supports named branches and
//! detached snapshots, restores prior snapshots into the working
//! directory, and performs three-way merges with textual conflict
//! marking.
//!
//! ## Architecture
//!
//! Everything is addressed by a deterministic content fingerprint
//! ([`fingerprint`]). Two object kinds live in the store ([`store`]):
//! blobs (raw file content) and commits (a flat tree map plus parents,
//! author, and message — see [`objects::commit`]). [`refs`] owns HEAD
//! and branch pointers; [`index`] is the staging area; [`graph`] answers
//! ancestry questions over the commit DAG. The six porcelain commands in
//! [`commands`] are façades over these engines.
//!
//! ## Repository Structure
//!
//! ```text
//! .minigit/
//! ├── HEAD            # "ref: refs/heads/<name>\n" or "<fingerprint>\n"
//! ├── index            # staging area: "<path> <fingerprint>\n" per line
//! ├── objects/          # object database
//! │   ├── ab/           # first 2 chars of fingerprint
//! │   │   └── cdef...   # remaining chars (zlib compressed)
//! │   └── ...
//! └── refs/
//!     └── heads/        # branch pointers, e.g. "main"
//! ```

pub mod commands;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod ignore;
pub mod index;
pub mod objects;
pub mod refs;
pub mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::MinigitError;

/// The name of the repository directory (analogous to `.git`).
pub const MINIGIT_DIR: &str = ".minigit";

/// The default branch created by `init`.
pub const DEFAULT_BRANCH: &str = "main";

/// A handle to a minigit repository, scoped to a single command
/// invocation and owning the root path and all derived subpaths.
#[derive(Debug)]
pub struct Repository {
    /// The working directory root (where `.minigit` lives).
    pub root: PathBuf,
    /// The `.minigit` directory path.
    pub minigit_dir: PathBuf,
}

impl Repository {
    /// Find the repository root by walking up from the current directory.
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::find_from(&current_dir)
    }

    /// Find the repository root starting from a specific path.
    pub fn find_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            let minigit_dir = current.join(MINIGIT_DIR);
            if minigit_dir.is_dir() {
                return Ok(Self { root: current, minigit_dir });
            }

            if !current.pop() {
                return Err(MinigitError::NotARepository.into());
            }
        }
    }

    /// Initialize a new repository at `path`.
    ///
    /// Creates `.minigit/{objects,refs/heads}` and a `HEAD` file attached
    /// to [`DEFAULT_BRANCH`]. If a repository already exists at `path`,
    /// this is a non-fatal no-op that reports [`MinigitError::AlreadyInitialized`].
    pub fn init(path: &Path) -> Result<Self> {
        let root = path.to_path_buf();
        let minigit_dir = root.join(MINIGIT_DIR);

        if minigit_dir.exists() {
            return Err(MinigitError::AlreadyInitialized.into());
        }

        std::fs::create_dir_all(minigit_dir.join("objects")).context("Failed to create objects directory")?;
        std::fs::create_dir_all(minigit_dir.join("refs").join("heads"))
            .context("Failed to create refs/heads directory")?;
        std::fs::write(minigit_dir.join("HEAD"), format!("ref: refs/heads/{DEFAULT_BRANCH}\n"))
            .context("Failed to create HEAD file")?;

        Ok(Self { root, minigit_dir })
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.minigit_dir.join("objects")
    }

    pub fn refs_dir(&self) -> PathBuf {
        self.minigit_dir.join("refs")
    }

    pub fn head_path(&self) -> PathBuf {
        self.minigit_dir.join("HEAD")
    }

    pub fn index_path(&self) -> PathBuf {
        self.minigit_dir.join("index")
    }
}
