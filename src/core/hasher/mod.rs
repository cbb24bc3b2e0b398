//! # Hasher Module
//!
//! Computes content fingerprints for files.
//!
//! ## How It Works
//! 1. Open the file (one handle at a time, released before the next file)
//! 2. Stream its bytes through SHA-256 with `io::copy`
//! 3. Return the 32-byte digest as a [`FileHash`]
//!
//! Files are never read into memory whole, so arbitrarily large files hash
//! in constant space.
//!
//! ## Example
//! ```rust,ignore
//! use duplicate_file_resolver::core::hasher::hash_file;
//!
//! let (hash, bytes) = hash_file(&path)?;
//! println!("{hash} ({bytes} bytes)");
//! ```

mod fingerprint;
mod stream;

pub use fingerprint::{FileHash, HASH_LEN};
pub use stream::{hash_bytes, hash_file, hash_reader};
