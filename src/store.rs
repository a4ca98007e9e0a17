//! # Object Store
//!
//! Persists blobs and commits by fingerprint under `objects/<F[0..2]>/<F[2..]>`,
//! zlib-compressed with a `"<type> <len>\0"` header, exactly as
//! `fingerprint::fingerprint` hashes them. Writes are write-if-absent:
//! re-storing identical content is a no-op, which is what makes
//! `put_blob` idempotent and `Commit` immutability hold (re-storing an
//! identical commit never touches the file on disk).

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::MinigitError;
use crate::fingerprint::fingerprint;
use crate::objects::Commit;
use crate::Repository;

fn object_shard_dir(repo: &Repository, f: &str) -> std::path::PathBuf {
    repo.objects_dir().join(&f[..2])
}

fn object_path(repo: &Repository, f: &str) -> std::path::PathBuf {
    object_shard_dir(repo, f).join(&f[2..])
}

/// A decompressed, header-parsed object read back from disk.
struct RawObject {
    object_type: String,
    content: Vec<u8>,
}

fn write_object(repo: &Repository, object_type: &str, content: &[u8]) -> Result<String, MinigitError> {
    let f = fingerprint(object_type, content);
    let path = object_path(repo, &f);

    if !path.exists() {
        std::fs::create_dir_all(object_shard_dir(repo, &f))
            .map_err(|e| MinigitError::MalformedObject(f.clone(), e.to_string()))?;

        let header = format!("{} {}\0", object_type, content.len());
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(header.as_bytes())
            .and_then(|_| encoder.write_all(content))
            .map_err(|e| MinigitError::MalformedObject(f.clone(), e.to_string()))?;
        let compressed = encoder
            .finish()
            .map_err(|e| MinigitError::MalformedObject(f.clone(), e.to_string()))?;

        std::fs::write(&path, compressed)
            .map_err(|e| MinigitError::MalformedObject(f.clone(), e.to_string()))?;
        tracing::debug!(fingerprint = %f, object_type, "wrote object");
    } else {
        tracing::trace!(fingerprint = %f, object_type, "object already present");
    }

    Ok(f)
}

fn read_object(repo: &Repository, f: &str) -> Result<RawObject, MinigitError> {
    if f.len() < 4 {
        return Err(MinigitError::MissingObject(f.to_string()));
    }

    let path = object_path(repo, f);
    if !path.exists() {
        return Err(MinigitError::MissingObject(f.to_string()));
    }

    let compressed = std::fs::read(&path).map_err(|_| MinigitError::MissingObject(f.to_string()))?;

    let mut decoder = ZlibDecoder::new(&compressed[..]);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| MinigitError::MalformedObject(f.to_string(), e.to_string()))?;

    let null_pos = decompressed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| MinigitError::MalformedObject(f.to_string(), "no header terminator".into()))?;

    let header = String::from_utf8_lossy(&decompressed[..null_pos]);
    let mut parts = header.splitn(2, ' ');
    let object_type = parts
        .next()
        .ok_or_else(|| MinigitError::MalformedObject(f.to_string(), "missing object type".into()))?
        .to_string();

    Ok(RawObject { object_type, content: decompressed[null_pos + 1..].to_vec() })
}

/// Store `content` as a blob, returning its fingerprint. Idempotent.
pub fn put_blob(repo: &Repository, content: &[u8]) -> Result<String, MinigitError> {
    write_object(repo, "blob", content)
}

/// Load a blob's content by fingerprint.
pub fn get_blob(repo: &Repository, f: &str) -> Result<Vec<u8>, MinigitError> {
    let object = read_object(repo, f)?;
    if object.object_type != "blob" {
        return Err(MinigitError::MalformedObject(f.to_string(), format!("expected blob, got {}", object.object_type)));
    }
    Ok(object.content)
}

/// Serialize and store a commit, returning its fingerprint. Idempotent:
/// storing an identical commit twice writes the file only once.
pub fn put_commit(repo: &Repository, commit: &Commit) -> Result<String, MinigitError> {
    write_object(repo, "commit", commit.serialize().as_bytes())
}

/// Load and parse a commit by fingerprint.
pub fn get_commit(repo: &Repository, f: &str) -> Result<Commit, MinigitError> {
    let object = read_object(repo, f)?;
    if object.object_type != "commit" {
        return Err(MinigitError::MalformedObject(f.to_string(), format!("expected commit, got {}", object.object_type)));
    }
    let text = String::from_utf8_lossy(&object.content);
    Commit::parse(&text)
}

/// Whether a fingerprint resolves to any stored object (blob or commit).
pub fn object_exists(repo: &Repository, f: &str) -> bool {
    f.len() >= 4 && object_path(repo, f).exists()
}
