//! # Grouper Module
//!
//! Turns the index into duplicate groups.
//!
//! ## How It Works
//! 1. Ask the index for every fingerprint with more than one location
//!    (`GROUP BY hash HAVING COUNT(*) > 1`)
//! 2. Fetch each fingerprint's full path list, in insertion order
//!
//! The path order is what the resolver numbers from 1, so it must be
//! reproducible for a given index.

use crate::core::hasher::FileHash;
use crate::core::index::LocationQuery;
use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every path holding one piece of content, when there are two or more
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Shared fingerprint
    pub hash: FileHash,
    /// Candidate paths, in the order the index recorded them
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of candidates
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when there are no candidates
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of copies that go away if the group is resolved
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Collect every duplicate group from an index
pub fn group_duplicates<Q>(source: &Q) -> Result<Vec<DuplicateGroup>, IndexError>
where
    Q: LocationQuery + ?Sized,
{
    let hashes = source.duplicate_hashes()?;
    let mut groups = Vec::with_capacity(hashes.len());

    for hash in hashes {
        let paths = source.locations_for(&hash)?;
        if paths.len() > 1 {
            groups.push(DuplicateGroup { hash, paths });
        }
    }

    tracing::debug!(groups = groups.len(), "grouped duplicates");
    Ok(groups)
}
