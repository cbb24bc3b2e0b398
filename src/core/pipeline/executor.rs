//! Pipeline execution implementation.

use crate::core::index::{store_files, FingerprintIndex, IndexStats};
use crate::core::resolver::{ResolutionDriver, ResolutionSummary};
use crate::core::scanner::{TreeWalker, WalkConfig, WalkSummary};
use crate::error::DedupError;
use crate::events::{
    null_sender, Event, EventSender, IndexEvent, PipelineEvent, PipelinePhase, PipelineSummary,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Where the index lives unless configured otherwise, relative to the
/// working directory
pub const DEFAULT_STORE_PATH: &str = "fingerprints.db";

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Totals of the walk
    pub walk: WalkSummary,
    /// Index contents right after the walk was committed
    pub index: IndexStats,
    /// Totals of the resolution pass
    pub resolution: ResolutionSummary,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            files_hashed: self.walk.files_hashed,
            distinct_hashes: self.index.hashes,
            duplicate_groups: self.resolution.groups_presented,
            groups_resolved: self.resolution.groups_resolved,
            groups_skipped: self.resolution.groups_skipped,
            files_deleted: self.resolution.files_deleted,
            duration_ms: self.duration_ms,
        }
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Index database, recreated on every run
    pub store_path: PathBuf,
    /// Walker configuration
    pub walk: WalkConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            walk: WalkConfig::default(),
        }
    }
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to scan
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Put the index database somewhere other than the default
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set walker configuration
    pub fn walk_config(mut self, config: WalkConfig) -> Self {
        self.config.walk = config;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

/// The scan → index → resolve workflow
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Recreate the store and load one full walk into it
    ///
    /// The walk's inserts are committed as a unit; on any error nothing is
    /// committed and the error is returned as-is.
    pub fn build_index(
        &self,
        events: &EventSender,
    ) -> Result<(FingerprintIndex, WalkSummary), DedupError> {
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Indexing,
        }));

        let mut index = FingerprintIndex::create(&self.config.store_path)?;

        let walk_config = self
            .config
            .walk
            .clone()
            .exclude(store_files(&self.config.store_path));
        let walker = TreeWalker::new(walk_config);

        let mut loader = index.begin_load()?;
        let summary = walker.walk(&self.config.root, &mut loader, events)?;
        loader.commit()?;

        let stats = index.stats()?;
        events.send(Event::Index(IndexEvent::Committed {
            hashes: stats.hashes,
            locations: stats.locations,
        }));
        tracing::info!(
            store = %index.path().display(),
            hashes = stats.hashes,
            locations = stats.locations,
            "index committed"
        );

        Ok((index, summary))
    }

    /// Group the committed index and resolve each group interactively
    pub fn resolve<R, W>(
        &self,
        index: &mut FingerprintIndex,
        input: R,
        output: W,
        events: &EventSender,
    ) -> Result<ResolutionSummary, DedupError>
    where
        R: BufRead,
        W: Write,
    {
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Grouping,
        }));
        let groups = index.duplicate_groups()?;
        tracing::info!(groups = groups.len(), "duplicate groups found");

        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Resolving,
        }));
        let mut driver = ResolutionDriver::new(input, output).with_events(events.clone());
        let summary = driver.run(groups, index)?;

        tracing::info!(
            resolved = summary.groups_resolved,
            skipped = summary.groups_skipped,
            deleted = summary.files_deleted,
            "resolution complete"
        );
        Ok(summary)
    }

    /// Run every phase without events
    pub fn run<R, W>(&self, input: R, output: W) -> Result<PipelineResult, DedupError>
    where
        R: BufRead,
        W: Write,
    {
        self.run_with_events(input, output, &null_sender())
    }

    /// Run every phase with event reporting
    pub fn run_with_events<R, W>(
        &self,
        input: R,
        output: W,
        events: &EventSender,
    ) -> Result<PipelineResult, DedupError>
    where
        R: BufRead,
        W: Write,
    {
        let start_time = Instant::now();

        let (mut index, walk) = self.build_index(events)?;
        let stats = index.stats()?;
        let resolution = self.resolve(&mut index, input, output, events)?;

        let result = PipelineResult {
            walk,
            index: stats,
            resolution,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: result.summary(),
        }));

        Ok(result)
    }
}
