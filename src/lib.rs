//! # Duplicate File Resolver
//!
//! Finds files with identical content under a directory and lets the user
//! keep one copy of each.
//!
//! ## How it works
//! - Every regular file is fingerprinted with SHA-256
//! - Fingerprints and paths go into a SQLite index, one transaction per walk
//! - Fingerprints seen at more than one path form a duplicate group
//! - For each group the user picks the copy to keep; the others are deleted
//!
//! ## Architecture
//! - `core` - The engine
//! - `events` - Event-driven progress reporting
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

/// Initialize tracing for the library
///
/// Diagnostics go to stderr so stdout carries only the resolution dialogue.
/// Filtering follows `RUST_LOG`. Calling this more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
