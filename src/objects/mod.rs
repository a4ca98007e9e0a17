//! # Object Types
//!
//! The two object kinds this core stores by fingerprint.
//!
//! - **Blob**: raw file content, `blob <size>\0<content>`.
//! - **Commit**: a flat `path -> blob fingerprint` tree map plus parents,
//!   author/committer, message, and timestamp. There is no separate tree
//!   object — paths are tracked flat, so the tree map lives directly on
//!   the commit.

pub mod blob;
pub mod commit;

pub use blob::Blob;
pub use commit::Commit;
