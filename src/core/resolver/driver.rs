//! The interactive keep/delete loop.

use super::{parse_selection, Resolution, ResolutionSummary, Selection, SkipReason};
use crate::core::grouper::DuplicateGroup;
use crate::core::index::LocationLedger;
use crate::error::{DedupError, ResolveError};
use crate::events::{null_sender, Event, EventSender, ResolveEvent};
use std::fmt;
use std::fs;
use std::io::{BufRead, Write};

const PROMPT: &str = "Please select which file to keep (0 to skip):";

/// Drives the keep/delete protocol over a reader and a writer
///
/// In the CLI these are locked stdin and stdout; tests pass byte buffers.
pub struct ResolutionDriver<R, W> {
    input: R,
    output: W,
    events: EventSender,
}

impl<R: BufRead, W: Write> ResolutionDriver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            events: null_sender(),
        }
    }

    /// Report decisions on `events`
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Resolve every group in turn
    pub fn run<I, L>(&mut self, groups: I, ledger: &mut L) -> Result<ResolutionSummary, DedupError>
    where
        I: IntoIterator<Item = DuplicateGroup>,
        L: LocationLedger + ?Sized,
    {
        let mut summary = ResolutionSummary::default();

        for group in groups {
            let resolution = self.resolve_group(&group, ledger)?;
            summary.record(&resolution);
        }

        Ok(summary)
    }

    /// Present one group, read the answer and act on it
    ///
    /// Every deleted path is also forgotten by `ledger`, right after its
    /// file is removed.
    pub fn resolve_group<L>(
        &mut self,
        group: &DuplicateGroup,
        ledger: &mut L,
    ) -> Result<Resolution, DedupError>
    where
        L: LocationLedger + ?Sized,
    {
        self.present(group)?;

        let keep = match self.read_selection(group.len()) {
            Selection::Keep(index) => index,
            Selection::Skip => {
                self.say(format_args!("0 selected... skipping"))?;
                return Ok(self.skipped(group, SkipReason::ZeroSelected));
            }
            Selection::Invalid => {
                self.say(format_args!("Invalid input... skipping"))?;
                tracing::warn!(hash = %group.hash, "invalid selection, group skipped");
                return Ok(self.skipped(group, SkipReason::InvalidInput));
            }
        };

        let kept = group.paths[keep - 1].clone();
        let mut deleted = Vec::with_capacity(group.duplicate_count());

        for (i, path) in group.paths.iter().enumerate() {
            if i + 1 == keep {
                self.say(format_args!("Selected file {} kept.", path.display()))?;
                self.events.send(Event::Resolve(ResolveEvent::FileKept {
                    path: path.clone(),
                }));
                continue;
            }

            fs::remove_file(path).map_err(|source| ResolveError::Delete {
                path: path.clone(),
                source,
            })?;
            self.say(format_args!("File {} deleted.", path.display()))?;
            tracing::info!(path = %path.display(), "deleted duplicate");
            self.events.send(Event::Resolve(ResolveEvent::FileDeleted {
                path: path.clone(),
            }));

            ledger.forget_location(&group.hash, path)?;
            deleted.push(path.clone());
        }

        Ok(Resolution::Resolved { kept, deleted })
    }

    /// Hand back the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn present(&mut self, group: &DuplicateGroup) -> Result<(), ResolveError> {
        self.events.send(Event::Resolve(ResolveEvent::GroupPresented {
            hash: group.hash.to_hex(),
            candidates: group.len(),
        }));

        self.say(format_args!("{}", group.hash))?;
        self.say(format_args!("Duplicate files found:"))?;
        for (i, path) in group.paths.iter().enumerate() {
            self.say(format_args!("{} {}", i + 1, path.display()))?;
        }
        self.say(format_args!("{}", PROMPT))?;
        self.output.flush().map_err(ResolveError::Output)
    }

    /// Blank lines are passed over until an answer arrives
    ///
    /// End of input and read failures count as an unusable answer.
    fn read_selection(&mut self, candidates: usize) -> Selection {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => return Selection::Invalid,
                Ok(_) if line.trim().is_empty() => continue,
                Ok(_) => return parse_selection(&line, candidates),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read selection");
                    return Selection::Invalid;
                }
            }
        }
    }

    fn skipped(&self, group: &DuplicateGroup, reason: SkipReason) -> Resolution {
        self.events.send(Event::Resolve(ResolveEvent::Skipped {
            hash: group.hash.to_hex(),
            reason,
        }));
        Resolution::Skipped(reason)
    }

    fn say(&mut self, line: fmt::Arguments<'_>) -> Result<(), ResolveError> {
        writeln!(self.output, "{}", line).map_err(ResolveError::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::hash_bytes;
    use crate::core::index::{FingerprintSink, InMemoryIndex, LocationQuery};
    use crate::events::EventChannel;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        group: DuplicateGroup,
        index: InMemoryIndex,
    }

    fn fixture(copies: usize) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let hash = hash_bytes(b"hello");
        let mut index = InMemoryIndex::new();
        index.record_hash(&hash).unwrap();

        let mut paths = Vec::new();
        for i in 0..copies {
            let path = temp_dir.path().join(format!("copy{i}.txt"));
            fs::write(&path, b"hello").unwrap();
            index.record_location(&hash, &path).unwrap();
            paths.push(path);
        }

        Fixture {
            _temp_dir: temp_dir,
            group: DuplicateGroup { hash, paths },
            index,
        }
    }

    fn resolve(fixture: &mut Fixture, answer: &str) -> (Resolution, String) {
        let mut driver = ResolutionDriver::new(Cursor::new(answer.as_bytes().to_vec()), Vec::new());
        let resolution = driver
            .resolve_group(&fixture.group, &mut fixture.index)
            .unwrap();
        let (_, output) = driver.into_parts();
        (resolution, String::from_utf8(output).unwrap())
    }

    fn all_exist(paths: &[PathBuf]) -> bool {
        paths.iter().all(|p| p.exists())
    }

    #[test]
    fn presents_numbered_candidates() {
        let mut fixture = fixture(2);
        let (_, output) = resolve(&mut fixture, "0\n");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], hash_bytes(b"hello").to_hex());
        assert_eq!(lines[1], "Duplicate files found:");
        assert_eq!(lines[2], format!("1 {}", fixture.group.paths[0].display()));
        assert_eq!(lines[3], format!("2 {}", fixture.group.paths[1].display()));
        assert_eq!(lines[4], PROMPT);
    }

    #[test]
    fn keeping_one_deletes_the_rest() {
        let mut fixture = fixture(3);
        let paths = fixture.group.paths.clone();

        let (resolution, output) = resolve(&mut fixture, "2\n");

        assert_eq!(
            resolution,
            Resolution::Resolved {
                kept: paths[1].clone(),
                deleted: vec![paths[0].clone(), paths[2].clone()],
            }
        );
        assert!(!paths[0].exists());
        assert!(paths[1].exists());
        assert!(!paths[2].exists());

        let tail: Vec<&str> = output.lines().skip(6).collect();
        assert_eq!(
            tail,
            vec![
                format!("File {} deleted.", paths[0].display()),
                format!("Selected file {} kept.", paths[1].display()),
                format!("File {} deleted.", paths[2].display()),
            ]
        );
    }

    #[test]
    fn deleted_paths_are_forgotten_by_the_ledger() {
        let mut fixture = fixture(2);
        let hash = fixture.group.hash;

        resolve(&mut fixture, "1\n");

        assert_eq!(
            fixture.index.locations_for(&hash).unwrap(),
            vec![fixture.group.paths[0].clone()]
        );
        assert!(fixture.index.duplicate_groups().unwrap().is_empty());
    }

    #[test]
    fn zero_skips_and_keeps_everything() {
        let mut fixture = fixture(2);
        let (resolution, output) = resolve(&mut fixture, "0\n");

        assert_eq!(resolution, Resolution::Skipped(SkipReason::ZeroSelected));
        assert!(output.ends_with("0 selected... skipping\n"));
        assert!(all_exist(&fixture.group.paths));
    }

    #[test]
    fn out_of_range_is_invalid() {
        let mut fixture = fixture(2);
        let (resolution, output) = resolve(&mut fixture, "5\n");

        assert_eq!(resolution, Resolution::Skipped(SkipReason::InvalidInput));
        assert!(output.ends_with("Invalid input... skipping\n"));
        assert!(all_exist(&fixture.group.paths));
    }

    #[test]
    fn negative_and_garbage_are_invalid() {
        for answer in ["-1\n", "abc\n"] {
            let mut fixture = fixture(2);
            let (resolution, _) = resolve(&mut fixture, answer);

            assert_eq!(resolution, Resolution::Skipped(SkipReason::InvalidInput));
            assert!(all_exist(&fixture.group.paths));
        }
    }

    #[test]
    fn blank_lines_before_the_answer_are_ignored() {
        let mut fixture = fixture(2);
        let paths = fixture.group.paths.clone();

        let (resolution, output) = resolve(&mut fixture, "\n  \n1\n");

        assert_eq!(
            resolution,
            Resolution::Resolved {
                kept: paths[0].clone(),
                deleted: vec![paths[1].clone()],
            }
        );
        assert!(paths[0].exists());
        assert!(!paths[1].exists());
        assert_eq!(output.matches(PROMPT).count(), 1);
    }

    #[test]
    fn blank_lines_then_end_of_input_is_invalid() {
        let mut fixture = fixture(2);
        let (resolution, _) = resolve(&mut fixture, "\n\n");

        assert_eq!(resolution, Resolution::Skipped(SkipReason::InvalidInput));
        assert!(all_exist(&fixture.group.paths));
    }

    #[test]
    fn resolved_group_reports_events_in_order() {
        let mut fixture = fixture(2);
        let paths = fixture.group.paths.clone();
        let (sender, receiver) = EventChannel::new();

        let mut driver = ResolutionDriver::new(Cursor::new(b"2\n".to_vec()), Vec::new())
            .with_events(sender);
        driver
            .resolve_group(&fixture.group, &mut fixture.index)
            .unwrap();
        drop(driver);

        let events: Vec<ResolveEvent> = receiver
            .iter()
            .filter_map(|e| match e {
                Event::Resolve(event) => Some(event),
                _ => None,
            })
            .collect();

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            ResolveEvent::GroupPresented { hash, candidates: 2 } if *hash == fixture.group.hash.to_hex()
        ));
        assert!(matches!(&events[1], ResolveEvent::FileDeleted { path } if *path == paths[0]));
        assert!(matches!(&events[2], ResolveEvent::FileKept { path } if *path == paths[1]));
    }

    #[test]
    fn skipped_group_reports_the_reason() {
        let mut fixture = fixture(2);
        let (sender, receiver) = EventChannel::new();

        let mut driver =
            ResolutionDriver::new(Cursor::new(b"0\n".to_vec()), Vec::new()).with_events(sender);
        driver
            .resolve_group(&fixture.group, &mut fixture.index)
            .unwrap();
        drop(driver);

        let skipped: Vec<SkipReason> = receiver
            .iter()
            .filter_map(|e| match e {
                Event::Resolve(ResolveEvent::Skipped { reason, .. }) => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec![SkipReason::ZeroSelected]);
    }

    #[test]
    fn end_of_input_is_invalid() {
        let mut fixture = fixture(2);
        let (resolution, _) = resolve(&mut fixture, "");

        assert_eq!(resolution, Resolution::Skipped(SkipReason::InvalidInput));
        assert!(all_exist(&fixture.group.paths));
    }

    #[test]
    fn deletion_failure_is_fatal() {
        let mut fixture = fixture(2);
        fs::remove_file(&fixture.group.paths[1]).unwrap();

        let mut driver = ResolutionDriver::new(Cursor::new(b"1\n".to_vec()), Vec::new());
        let result = driver.resolve_group(&fixture.group, &mut fixture.index);

        assert!(matches!(
            result,
            Err(DedupError::Resolve(ResolveError::Delete { .. }))
        ));
        assert!(fixture.group.paths[0].exists());
    }

    #[test]
    fn run_consumes_one_answer_per_group() {
        let temp_dir = TempDir::new().unwrap();
        let mut index = InMemoryIndex::new();
        let mut groups = Vec::new();

        for content in [&b"first"[..], &b"second"[..], &b"third"[..]] {
            let hash = hash_bytes(content);
            index.record_hash(&hash).unwrap();
            let mut paths = Vec::new();
            for copy in 0..2 {
                let path = temp_dir
                    .path()
                    .join(format!("{}-{copy}", String::from_utf8_lossy(content)));
                fs::write(&path, content).unwrap();
                index.record_location(&hash, &path).unwrap();
                paths.push(path);
            }
            groups.push(DuplicateGroup { hash, paths });
        }

        let mut driver = ResolutionDriver::new(Cursor::new(b"1\n0\nxyz\n".to_vec()), Vec::new());
        let summary = driver.run(groups.clone(), &mut index).unwrap();

        assert_eq!(
            summary,
            ResolutionSummary {
                groups_presented: 3,
                groups_resolved: 1,
                groups_skipped: 2,
                files_deleted: 1,
            }
        );
        assert!(groups[0].paths[0].exists());
        assert!(!groups[0].paths[1].exists());
        assert!(all_exist(&groups[1].paths));
        assert!(all_exist(&groups[2].paths));
    }

    #[test]
    fn run_with_no_groups_reads_nothing() {
        let mut index = InMemoryIndex::new();
        let mut driver = ResolutionDriver::new(Cursor::new(b"1\n".to_vec()), Vec::new());

        let summary = driver.run(Vec::new(), &mut index).unwrap();
        let (mut input, output) = driver.into_parts();

        assert_eq!(summary, ResolutionSummary::default());
        assert!(output.is_empty());
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "1\n");
    }
}
