//! # Core Module
//!
//! The UI-agnostic duplicate resolution engine.
//!
//! ## Modules
//! - `hasher` - SHA-256 content fingerprints
//! - `scanner` - Walks a directory tree and fingerprints every file
//! - `index` - Records fingerprints and their locations
//! - `grouper` - Reads duplicate groups back out of the index
//! - `resolver` - Asks which copy to keep and deletes the rest
//! - `pipeline` - Orchestrates the full workflow

pub mod grouper;
pub mod hasher;
pub mod index;
pub mod pipeline;
pub mod resolver;
pub mod scanner;

// Re-export commonly used types
pub use grouper::DuplicateGroup;
pub use hasher::FileHash;
pub use index::{FingerprintIndex, IndexStats};
pub use pipeline::{Pipeline, PipelineConfig, PipelineResult};
pub use resolver::{Resolution, ResolutionSummary, SkipReason};
pub use scanner::{TreeWalker, WalkConfig, WalkSummary};
