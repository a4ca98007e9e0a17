//! # Fingerprinter
//!
//! Maps a byte sequence to a deterministic, lowercase hex fingerprint.
//! Equal content always yields an equal fingerprint; nothing here reads
//! the clock or any other nondeterministic input, which is what makes
//! blob storage idempotent (`put_blob(x); put_blob(x)` stores once).
//!
//! The header-then-content scheme (`"<type> <len>\0<content>"`) mirrors
//! git's own object hashing so that two objects of different declared
//! type never collide even if their raw bytes happen to match.

use sha1::{Digest, Sha1};

/// Compute the fingerprint of `content` tagged with `object_type`.
///
/// # Example
///
/// ```
/// use minigit::fingerprint::fingerprint;
///
/// let f = fingerprint("blob", b"hello\n");
/// assert_eq!(f.len(), 40);
/// assert_eq!(f, fingerprint("blob", b"hello\n"));
/// ```
pub fn fingerprint(object_type: &str, content: &[u8]) -> String {
    let header = format!("{} {}\0", object_type, content.len());

    let mut hasher = Sha1::new();
    hasher.update(header.as_bytes());
    hasher.update(content);

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = fingerprint("blob", b"test content\n");
        let b = fingerprint("blob", b"test content\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn distinguishes_type() {
        let blob = fingerprint("blob", b"x");
        let commit = fingerprint("commit", b"x");
        assert_ne!(blob, commit);
    }

    #[test]
    fn distinguishes_content() {
        assert_ne!(fingerprint("blob", b"a"), fingerprint("blob", b"b"));
    }
}
