//! # Error Module
//!
//! Error types for the duplicate file resolver.
//!
//! ## Policy
//! - **Fail fast** - walk, digest, store and deletion failures abort the run
//! - **Include context** - every error names the path it was working on
//! - Bad user input is not an error; the resolver skips the group instead

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors that occur while enumerating the directory tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to resolve {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting file content
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to open file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fingerprint: {value:?} (expected 64 hex characters)")]
    InvalidHex { value: String },
}

/// Errors that occur with the fingerprint index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to remove stale index at {path}: {source}")]
    RemoveStale {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open index database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to create index schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Index query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Path is not valid UTF-8 and cannot be indexed: {path}")]
    NonUtf8Path { path: PathBuf },

    #[error("Location recorded for unknown fingerprint {hash}")]
    UnknownFingerprint { hash: String },
}

/// Errors that occur while resolving duplicate groups
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to output: {0}")]
    Output(#[source] std::io::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;
