//! Capabilities the walker, grouper and resolver are given.

use crate::core::hasher::FileHash;
use crate::error::IndexError;
use std::path::{Path, PathBuf};

/// Write side used by the tree walker
pub trait FingerprintSink {
    /// Ensure the fingerprint exists; no-op if already present
    fn record_hash(&mut self, hash: &FileHash) -> Result<(), IndexError>;

    /// Ensure the `(hash, path)` pair exists; no-op if already present
    ///
    /// The hash must have been recorded first.
    fn record_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError>;
}

/// Read side used by the duplicate grouper
pub trait LocationQuery {
    /// Every fingerprint associated with more than one path, in order of
    /// first insertion
    fn duplicate_hashes(&self) -> Result<Vec<FileHash>, IndexError>;

    /// All paths recorded for `hash`, in insertion order
    fn locations_for(&self, hash: &FileHash) -> Result<Vec<PathBuf>, IndexError>;
}

/// Bookkeeping used by the resolver after it deletes a file
pub trait LocationLedger {
    /// Remove the `(hash, path)` pair
    ///
    /// The fingerprint itself is dropped once no location refers to it.
    fn forget_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError>;
}
