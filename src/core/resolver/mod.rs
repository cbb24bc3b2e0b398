//! # Resolver Module
//!
//! Asks the user which copy of each duplicate group to keep and deletes
//! the rest.
//!
//! ## Protocol
//! For every group, in order:
//! 1. Print the fingerprint, `Duplicate files found:`, then each candidate
//!    as `<n> <path>` numbered from 1
//! 2. Prompt and read one line
//! 3. `0` skips; anything unparseable, negative or past the last candidate
//!    skips with an invalidity notice; `n` keeps candidate `n` and deletes
//!    every other one
//!
//! Groups are handled strictly one after another. A deletion failure aborts
//! the run; a group interrupted mid-way stays partially resolved.

mod driver;
mod selection;

pub use driver::ResolutionDriver;
pub use selection::{parse_selection, Selection};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Why a group was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The user entered 0
    ZeroSelected,
    /// The answer was not a number, was negative, or was out of range
    InvalidInput,
}

/// Outcome of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was deleted
    Skipped(SkipReason),
    /// One copy survived and every other one was removed
    Resolved {
        kept: PathBuf,
        deleted: Vec<PathBuf>,
    },
}

/// Totals of a resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Groups shown to the user
    pub groups_presented: usize,
    /// Groups where a copy was kept
    pub groups_resolved: usize,
    /// Groups left untouched
    pub groups_skipped: usize,
    /// Files removed from disk
    pub files_deleted: usize,
}

impl ResolutionSummary {
    fn record(&mut self, resolution: &Resolution) {
        self.groups_presented += 1;
        match resolution {
            Resolution::Skipped(_) => self.groups_skipped += 1,
            Resolution::Resolved { deleted, .. } => {
                self.groups_resolved += 1;
                self.files_deleted += deleted.len();
            }
        }
    }
}
