//! # Scanner Module
//!
//! Walks a directory tree and fingerprints every file in it.
//!
//! ## Behavior
//! - Recurses without a depth limit, in file-name order
//! - Every non-directory entry is opened and hashed; symlinks are not
//!   followed during traversal and get no special treatment
//! - Any error (unreadable directory, unopenable file, failed read) aborts
//!   the walk. A partial index is worse than none.
//!
//! ## Example
//! ```rust,ignore
//! use duplicate_file_resolver::core::index::InMemoryIndex;
//! use duplicate_file_resolver::core::scanner::{TreeWalker, WalkConfig};
//!
//! let mut index = InMemoryIndex::new();
//! let summary = TreeWalker::new(WalkConfig::default()).walk(&root, &mut index, &null_sender())?;
//! ```

mod walker;

pub use walker::{TreeWalker, WalkConfig};

use serde::{Deserialize, Serialize};

/// Totals of one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Files fingerprinted and recorded
    pub files_hashed: usize,
    /// Directories entered, the root included
    pub directories_visited: usize,
    /// Total content streamed through the hasher
    pub bytes_hashed: u64,
}
