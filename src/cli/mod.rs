//! # CLI Module
//!
//! Command-line interface for the duplicate file resolver.
//!
//! ## Usage
//! ```bash
//! # Find duplicates under ~/Documents and choose which copies to keep
//! file-dedup ~/Documents
//!
//! # Show per-file diagnostics
//! RUST_LOG=debug file-dedup ~/Documents
//! ```
//!
//! The resolution dialogue is on stdin/stdout. Progress, summaries and
//! diagnostics go to stderr.

use clap::Parser;
use console::{style, Term};
use duplicate_file_resolver::core::index::IndexStats;
use duplicate_file_resolver::core::pipeline::{Pipeline, DEFAULT_STORE_PATH};
use duplicate_file_resolver::core::resolver::ResolutionSummary;
use duplicate_file_resolver::core::scanner::WalkSummary;
use duplicate_file_resolver::error::Result;
use duplicate_file_resolver::events::{
    null_sender, Event, EventChannel, EventReceiver, PipelineEvent, WalkEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Duplicate File Resolver - keep one copy of every file
#[derive(Parser, Debug)]
#[command(name = "file-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate files
    root: PathBuf,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let term = Term::stderr();
    let start_time = Instant::now();

    let pipeline = Pipeline::builder()
        .root(cli.root)
        .store_path(DEFAULT_STORE_PATH)
        .build();

    let (sender, receiver) = EventChannel::new();
    let spinner = walk_spinner();
    let event_thread = {
        let spinner = spinner.clone();
        thread::spawn(move || drive_spinner(&spinner, receiver))
    };

    let built = pipeline.build_index(&sender);

    // The spinner must be gone before the first prompt is printed
    drop(sender);
    event_thread.join().ok();
    spinner.finish_and_clear();

    let (mut index, walk) = built?;
    let stats = index.stats()?;
    print_walk_summary(&term, &walk, &stats);

    let resolution = pipeline.resolve(
        &mut index,
        io::stdin().lock(),
        io::stdout().lock(),
        &null_sender(),
    )?;
    print_resolution_summary(&term, &resolution, start_time.elapsed());

    Ok(())
}

fn walk_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn drive_spinner(pb: &ProgressBar, receiver: EventReceiver) {
    for event in receiver.iter() {
        match event {
            Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                pb.set_message(format!("{}", phase));
            }
            Event::Walk(WalkEvent::Progress(p)) => {
                pb.set_message(format!(
                    "{} files hashed ({})",
                    p.files_hashed,
                    p.current_path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                ));
            }
            Event::Walk(WalkEvent::Completed { .. }) => {
                pb.finish_and_clear();
            }
            _ => {}
        }
    }
}

fn print_walk_summary(term: &Term, walk: &WalkSummary, stats: &IndexStats) {
    term.write_line(&format!(
        "{} {} files hashed ({}), {} distinct",
        style("✓").green().bold(),
        style(walk.files_hashed).cyan(),
        format_bytes(walk.bytes_hashed),
        style(stats.hashes).cyan(),
    ))
    .ok();
}

fn print_resolution_summary(term: &Term, summary: &ResolutionSummary, elapsed: Duration) {
    if summary.groups_presented == 0 {
        term.write_line(&format!("  {}", style("No duplicates found.").green()))
            .ok();
        return;
    }

    term.write_line(&format!(
        "{} {} duplicate groups: {} resolved, {} skipped, {} files deleted in {:.1}s",
        style("✓").green().bold(),
        style(summary.groups_presented).cyan(),
        style(summary.groups_resolved).cyan(),
        style(summary.groups_skipped).yellow(),
        style(summary.files_deleted).red(),
        elapsed.as_secs_f64()
    ))
    .ok();
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
