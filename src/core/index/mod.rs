//! # Index Module
//!
//! Records which paths hold which content.
//!
//! ## Relations
//! - `files` - every distinct fingerprint seen during the walk
//! - `locations` - every `(fingerprint, path)` pair, keyed on both columns
//!
//! All inserts are idempotent. A walk loads the index inside a single
//! transaction ([`FingerprintIndex::begin_load`]) so readers never observe a
//! partial walk.
//!
//! ## Backends
//! - `FingerprintIndex` - SQLite store, recreated on every run
//! - `InMemoryIndex` - For testing

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryIndex;
pub use sqlite::{store_files, FingerprintIndex, IndexLoader};
pub use traits::{FingerprintSink, LocationLedger, LocationQuery};

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row counts of the two relations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Distinct fingerprints
    pub hashes: usize,
    /// `(fingerprint, path)` pairs
    pub locations: usize,
}

/// Paths are stored as text; anything that is not UTF-8 is refused
pub(crate) fn path_text(path: &Path) -> Result<&str, IndexError> {
    path.to_str().ok_or_else(|| IndexError::NonUtf8Path {
        path: path.to_path_buf(),
    })
}
