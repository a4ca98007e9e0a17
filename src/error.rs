//! # Error Kinds
//!
//! Structured error kinds for the core engines (object store, reference
//! store, index, commit graph, snapshot/checkout/merge). The command
//! façade matches on these to print a single human-readable line and
//! choose an exit code; lower layers otherwise use `anyhow::Result` and
//! `.context(...)` the way the rest of this crate does.

use thiserror::Error;

/// A structured failure kind from one of the core engines.
///
/// Each variant corresponds to an error kind named in the design's
/// error-handling section; the façade is the only place that prints
/// these or decides an exit code.
#[derive(Debug, Error)]
pub enum MinigitError {
    #[error("fatal: not a minigit repository (or any of the parent directories): .minigit")]
    NotARepository,

    #[error("Reinitialized existing minigit repository")]
    AlreadyInitialized,

    #[error("fatal: pathspec '{0}' did not match any files")]
    PathNotFound(String),

    #[error("nothing to commit, working tree clean")]
    EmptyIndex,

    #[error("fatal: reference '{0}' not found")]
    UnknownTarget(String),

    #[error("fatal: a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("fatal: your current branch does not have any commits yet")]
    NoCommits,

    #[error("fatal: object {0} not found in the object database")]
    MissingObject(String),

    #[error("fatal: object {0} is malformed: {1}")]
    MalformedObject(String, String),

    #[error("fatal: refusing to merge unrelated histories")]
    NoCommonAncestor,

    #[error("Automatic merge failed; fix conflicts and then commit the result.")]
    MergeConflict,

    #[error("fatal: cannot commit while HEAD is detached")]
    DetachedCommit,
}
