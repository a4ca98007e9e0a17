//! # Command Façade
//!
//! The six porcelain commands exposed by minigit, each a thin façade
//! that resolves the repository, invokes the relevant engine, and
//! reports a human-readable status line.
//!
//! - `init`: create a repository.
//! - `add`: stage files into the index.
//! - `commit`: snapshot the index into a new commit (Snapshot Engine).
//! - `log`: print first-parent commit history from HEAD.
//! - `branch`: list or create branches.
//! - `checkout`: switch HEAD to a branch or commit (Checkout Engine).
//! - `merge`: three-way merge a branch into HEAD (Merge Engine).

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
