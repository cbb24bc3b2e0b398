//! In-memory index backend for testing.

use super::{path_text, FingerprintSink, IndexStats, LocationLedger, LocationQuery};
use crate::core::grouper::{group_duplicates, DuplicateGroup};
use crate::core::hasher::FileHash;
use crate::error::IndexError;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory index backend
///
/// Mirrors the SQLite index: idempotent inserts, insertion-ordered reads,
/// and locations may only refer to recorded fingerprints.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    hashes: HashSet<FileHash>,
    locations: Vec<(FileHash, PathBuf)>,
}

impl InMemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fingerprint with two or more paths, with its paths
    pub fn duplicate_groups(&self) -> Result<Vec<DuplicateGroup>, IndexError> {
        group_duplicates(self)
    }

    /// Row counts of both relations
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            hashes: self.hashes.len(),
            locations: self.locations.len(),
        }
    }

    /// All recorded `(fingerprint, path)` pairs in insertion order
    pub fn entries(&self) -> &[(FileHash, PathBuf)] {
        &self.locations
    }
}

impl FingerprintSink for InMemoryIndex {
    fn record_hash(&mut self, hash: &FileHash) -> Result<(), IndexError> {
        self.hashes.insert(*hash);
        Ok(())
    }

    fn record_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
        path_text(path)?;

        if !self.hashes.contains(hash) {
            return Err(IndexError::UnknownFingerprint {
                hash: hash.to_hex(),
            });
        }

        let exists = self
            .locations
            .iter()
            .any(|(h, p)| h == hash && p.as_path() == path);
        if !exists {
            self.locations.push((*hash, path.to_path_buf()));
        }

        Ok(())
    }
}

impl LocationQuery for InMemoryIndex {
    fn duplicate_hashes(&self) -> Result<Vec<FileHash>, IndexError> {
        let mut counts: HashMap<FileHash, usize> = HashMap::new();
        let mut order = Vec::new();

        for (hash, _) in &self.locations {
            let count = counts.entry(*hash).or_insert(0);
            if *count == 0 {
                order.push(*hash);
            }
            *count += 1;
        }

        Ok(order.into_iter().filter(|h| counts[h] > 1).collect())
    }

    fn locations_for(&self, hash: &FileHash) -> Result<Vec<PathBuf>, IndexError> {
        Ok(self
            .locations
            .iter()
            .filter(|(h, _)| h == hash)
            .map(|(_, p)| p.clone())
            .collect())
    }
}

impl LocationLedger for InMemoryIndex {
    fn forget_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
        self.locations
            .retain(|(h, p)| !(h == hash && p.as_path() == path));

        if !self.locations.iter().any(|(h, _)| h == hash) {
            self.hashes.remove(hash);
        }

        Ok(())
    }
}
