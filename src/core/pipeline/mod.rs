//! # Pipeline Module
//!
//! Orchestrates a full run.
//!
//! ## Pipeline Stages
//! 1. **Index** - Recreate the store, walk the tree inside one transaction,
//!    commit
//! 2. **Group** - Query the committed index for duplicate fingerprints
//! 3. **Resolve** - Ask the user about each group, delete the losers
//!
//! The stages never overlap. Grouping only starts after the commit, so it
//! never sees a partial walk.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, DEFAULT_STORE_PATH};
