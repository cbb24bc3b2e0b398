//! Directory walking implementation using walkdir.

use super::WalkSummary;
use crate::core::hasher::hash_file;
use crate::core::index::FingerprintSink;
use crate::error::{DedupError, ScanError};
use crate::events::{Event, EventSender, WalkEvent, WalkProgress};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the tree walker
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Files that must never be fingerprinted, even when found in the tree
    pub exclude: Vec<PathBuf>,
}

impl WalkConfig {
    /// Add files to skip
    pub fn exclude<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.exclude.extend(paths);
        self
    }
}

/// Recursive walker that feeds a [`FingerprintSink`]
pub struct TreeWalker {
    config: WalkConfig,
}

impl TreeWalker {
    /// Create a walker with the given configuration
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Fingerprint every file under `root` and record it in `sink`
    ///
    /// For each file the hash is recorded before its location. The first
    /// error of any kind ends the walk.
    pub fn walk(
        &self,
        root: &Path,
        sink: &mut dyn FingerprintSink,
        events: &EventSender,
    ) -> Result<WalkSummary, DedupError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        let exclusions = Exclusions::resolve(&self.config.exclude);
        let mut summary = WalkSummary::default();

        events.send(Event::Walk(WalkEvent::Started {
            root: root.to_path_buf(),
        }));
        tracing::info!(root = %root.display(), "walking");

        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

        for entry_result in walker {
            let entry = entry_result.map_err(|source| {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                ScanError::Walk { path, source }
            })?;

            if entry.file_type().is_dir() {
                summary.directories_visited += 1;
                continue;
            }

            let path = without_cur_dir(entry.path());

            if exclusions.matches(path)? {
                tracing::debug!(path = %path.display(), "skipping index file");
                continue;
            }

            let (hash, bytes) = hash_file(path)?;
            sink.record_hash(&hash)?;
            sink.record_location(&hash, path)?;

            summary.files_hashed += 1;
            summary.bytes_hashed += bytes;
            tracing::debug!(path = %path.display(), %hash, bytes, "hashed");

            events.send(Event::Walk(WalkEvent::Progress(WalkProgress {
                files_hashed: summary.files_hashed,
                directories_visited: summary.directories_visited,
                bytes_hashed: summary.bytes_hashed,
                current_path: path.to_path_buf(),
            })));
        }

        events.send(Event::Walk(WalkEvent::Completed {
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
        }));
        tracing::info!(
            files = summary.files_hashed,
            directories = summary.directories_visited,
            bytes = summary.bytes_hashed,
            "walk complete"
        );

        Ok(summary)
    }
}

/// Excluded files, pinned to absolute locations
///
/// Exclusions may not exist yet when the walk starts (a journal appears
/// once the first insert runs), so only their parent directory is resolved.
struct Exclusions {
    names: HashSet<OsString>,
    targets: HashSet<PathBuf>,
}

impl Exclusions {
    fn resolve(paths: &[PathBuf]) -> Self {
        let mut names = HashSet::new();
        let mut targets = HashSet::new();

        for path in paths {
            if let Some(name) = path.file_name() {
                if let Ok(target) = anchored(path) {
                    names.insert(name.to_os_string());
                    targets.insert(target);
                }
            }
        }

        Self { names, targets }
    }

    fn matches(&self, path: &Path) -> Result<bool, ScanError> {
        let named = path
            .file_name()
            .is_some_and(|name| self.names.contains(name));
        if !named {
            return Ok(false);
        }

        let target = anchored(path).map_err(|source| ScanError::Canonicalize {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.targets.contains(&target))
    }
}

/// `./a/x.txt` is recorded as `a/x.txt`
fn without_cur_dir(path: &Path) -> &Path {
    path.strip_prefix(Component::CurDir).unwrap_or(path)
}

/// Canonical parent directory joined with the file name
fn anchored(path: &Path) -> std::io::Result<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path.file_name().unwrap_or_default();
    Ok(fs::canonicalize(parent)?.join(name))
}
