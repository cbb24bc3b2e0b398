//! Streaming SHA-256 over readers and files.

use super::{FileHash, HASH_LEN};
use crate::error::HashError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Hash everything a reader yields
///
/// Returns the digest and the number of bytes consumed.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<(FileHash, u64)> {
    let mut hasher = Sha256::new();
    let bytes = io::copy(&mut reader, &mut hasher)?;
    let digest: [u8; HASH_LEN] = hasher.finalize().into();
    Ok((FileHash::from_bytes(digest), bytes))
}

/// Hash an in-memory byte slice
pub fn hash_bytes(data: &[u8]) -> FileHash {
    FileHash::from_bytes(Sha256::digest(data).into())
}

/// Hash the content of the file at `path`
///
/// The handle is dropped before this returns.
pub fn hash_file(path: &Path) -> Result<(FileHash, u64), HashError> {
    let file = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    hash_reader(file).map_err(|source| HashError::Read {
        path: path.to_path_buf(),
        source,
    })
}
