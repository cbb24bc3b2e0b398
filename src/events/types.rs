//! Event type definitions.

use crate::core::resolver::SkipReason;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the engine reports while it runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Walk(WalkEvent),
    Index(IndexEvent),
    Resolve(ResolveEvent),
    Pipeline(PipelineEvent),
}

/// Events from the tree walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalkEvent {
    /// Walk of `root` has begun
    Started { root: PathBuf },
    /// A file was fingerprinted
    Progress(WalkProgress),
    /// Every file under the root has been fingerprinted
    Completed {
        files_hashed: usize,
        bytes_hashed: u64,
    },
}

/// Running totals of a walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkProgress {
    pub files_hashed: usize,
    pub directories_visited: usize,
    pub bytes_hashed: u64,
    /// File that was just hashed
    pub current_path: PathBuf,
}

/// Events from the fingerprint index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndexEvent {
    /// The walk's inserts were committed
    Committed { hashes: usize, locations: usize },
}

/// Events from the interactive resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolveEvent {
    /// A group was shown to the user
    GroupPresented { hash: String, candidates: usize },
    /// The user's answer left the group untouched
    Skipped { hash: String, reason: SkipReason },
    /// The chosen survivor
    FileKept { path: PathBuf },
    /// A losing copy was removed from disk
    FileDeleted { path: PathBuf },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// All phases finished
    Completed { summary: PipelineSummary },
}

/// Phases of a run, always in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Indexing,
    Grouping,
    Resolving,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Indexing => write!(f, "Indexing"),
            PipelinePhase::Grouping => write!(f, "Grouping"),
            PipelinePhase::Resolving => write!(f, "Resolving"),
        }
    }
}

/// Totals of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub files_hashed: usize,
    pub distinct_hashes: usize,
    pub duplicate_groups: usize,
    pub groups_resolved: usize,
    pub groups_skipped: usize,
    pub files_deleted: usize,
    pub duration_ms: u64,
}
