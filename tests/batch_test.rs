use flac2mp3::converter::ConversionDriver;
use flac2mp3::error::Result;
use flac2mp3::file_manager::FileManager;
use flac2mp3::translator::{Id3Container, TagContainer};
use flac2mp3::{
    BatchOrchestrator, CanonicalTagSet, ConvertError, MappingEntry, MappingTable, MetadataReader,
    ProgressEvent, ReferenceVocabulary, TagTranslator, TargetFrame, Transcoder,
};
use id3::TagLike;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Writes a minimal MP3 stream; stems listed in `fail` get a truncated write and an error
struct FakeTranscoder {
    fail: HashSet<String>,
}

impl Transcoder for FakeTranscoder {
    fn transcode(&self, input: &Path, output: &Path, _bitrate: &str) -> Result<()> {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail.contains(&stem) {
            std::fs::write(output, b"partial")?;
            return Err(ConvertError::Transcode(format!("{} is broken", stem)));
        }
        let mut bytes = vec![0xFF, 0xFB, 0x90, 0x64];
        bytes.resize(512, 0);
        std::fs::write(output, bytes)?;
        Ok(())
    }
}

/// Tags keyed by source file name; names missing from the map are unreadable
struct FakeReader {
    tags: HashMap<String, Vec<(&'static str, &'static str)>>,
}

impl MetadataReader for FakeReader {
    fn extract(&self, path: &Path) -> Result<CanonicalTagSet> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let pairs = self.tags.get(&name).ok_or_else(|| ConvertError::UnreadableMetadata {
            path: path.to_path_buf(),
            reason: "not a FLAC stream".to_string(),
        })?;

        let mut tags = CanonicalTagSet::new();
        for (key, value) in pairs {
            tags.push(key, *value);
        }
        Ok(tags)
    }
}

fn entry(key: &str, frame: &str, description: &str) -> MappingEntry {
    MappingEntry {
        source_key: key.to_string(),
        target_frame: frame.to_string(),
        description: description.to_string(),
    }
}

fn orchestrator(
    fail: &[&str],
    tags: &[(&str, Vec<(&'static str, &'static str)>)],
) -> BatchOrchestrator {
    let mapping = MappingTable::from_entries(vec![
        entry("title", "TIT2", "Title"),
        entry("artist", "TPE1", "Lead performer"),
    ])
    .unwrap();
    let translator = TagTranslator::new(
        Arc::new(mapping),
        ReferenceVocabulary::new(["title", "artist"]),
    );
    let driver = ConversionDriver::new(Box::new(FakeTranscoder {
        fail: fail.iter().map(|s| s.to_string()).collect(),
    }));
    let reader = FakeReader {
        tags: tags
            .iter()
            .map(|(name, pairs)| (name.to_string(), pairs.clone()))
            .collect(),
    };
    BatchOrchestrator::new(driver, Box::new(reader), translator)
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"fLaC").unwrap();
    path
}

fn event(percent: u8, message: &str) -> ProgressEvent {
    ProgressEvent::new(percent, message)
}

#[test]
fn test_two_files_are_converted_and_tagged() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "b.flac");
    touch(dir, "a.flac");

    let orchestrator = orchestrator(
        &[],
        &[
            ("a.flac", vec![("TITLE", "Song A"), ("ARTIST", "X")]),
            ("b.flac", vec![("title", "Song B")]),
        ],
    );
    let events: Vec<ProgressEvent> = orchestrator.run_batch(dir, "192k").unwrap().collect();

    assert_eq!(
        events,
        vec![
            event(50, "Converting a.flac..."),
            event(50, "Adding TIT2 (Title) with value Song A ..."),
            event(50, "Adding TPE1 (Lead performer) with value X ..."),
            event(50, "No album cover to add"),
            event(100, "Converting b.flac..."),
            event(100, "Adding TIT2 (Title) with value Song B ..."),
            event(100, "No album cover to add"),
            event(100, "Conversion complete."),
        ]
    );

    let tag = id3::Tag::read_from_path(dir.join("a.mp3")).unwrap();
    assert_eq!(tag.title(), Some("Song A"));
    assert_eq!(tag.artist(), Some("X"));
    let tag = id3::Tag::read_from_path(dir.join("b.mp3")).unwrap();
    assert_eq!(tag.title(), Some("Song B"));
}

#[test]
fn test_percent_never_decreases() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    for name in ["1.flac", "2.flac", "3.flac"] {
        touch(dir, name);
    }

    let orchestrator = orchestrator(
        &[],
        &[
            ("1.flac", vec![("title", "One")]),
            ("2.flac", vec![("title", "Two")]),
            ("3.flac", vec![("title", "Three")]),
        ],
    );
    let percents: Vec<u8> = orchestrator
        .run_batch(dir, "192k")
        .unwrap()
        .map(|e| e.percent)
        .collect();

    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(percents.first(), Some(&33));
    assert_eq!(percents.last(), Some(&100));
}

#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "notes.txt");

    let events: Vec<ProgressEvent> = orchestrator(&[], &[])
        .run_batch(dir, "192k")
        .unwrap()
        .collect();

    assert_eq!(
        events,
        vec![
            event(100, &format!("Nothing to convert in {}", dir.display())),
            event(100, "Conversion complete."),
        ]
    );
}

#[test]
fn test_failed_conversion_continues_with_next_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.flac");
    touch(dir, "b.flac");

    let orchestrator = orchestrator(&["a"], &[("b.flac", vec![("title", "Song B")])]);
    let mut batch = orchestrator.run_batch(dir, "192k").unwrap();
    let events: Vec<ProgressEvent> = batch.by_ref().collect();

    assert_eq!(events[0], event(50, "Converting a.flac..."));
    assert_eq!(
        events[1],
        event(50, "WARNING: Conversion of a.flac appears unsuccessful")
    );
    assert_eq!(events[2], event(100, "Converting b.flac..."));
    assert_eq!(events.last(), Some(&event(100, "Conversion complete.")));
    assert!(!dir.join("a.mp3").exists());
    assert!(dir.join("b.mp3").exists());

    let summary = batch.summary();
    assert_eq!(summary.files_found, 2);
    assert_eq!(summary.files_converted, 1);
    assert_eq!(summary.conversions_failed, 1);
    assert_eq!(batch.converted_sources(), &[dir.join("b.flac")]);
}

#[test]
fn test_failed_conversion_source_survives_deletion() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let failed = touch(dir, "a.flac");
    let converted = touch(dir, "b.flac");

    let orchestrator = orchestrator(&["a"], &[("b.flac", vec![("title", "Song B")])]);
    let mut batch = orchestrator.run_batch(dir, "192k").unwrap();
    batch.by_ref().for_each(drop);

    let log = FileManager::delete_converted_sources(batch.converted_sources(), "mp3");

    assert!(failed.exists());
    assert!(!converted.exists());
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("Deleted b.flac"));
}

/// Accepts frames, refuses to save
struct ReadOnlyContainer {
    path: PathBuf,
    frames: Vec<TargetFrame>,
}

impl TagContainer for ReadOnlyContainer {
    fn add_frame(&mut self, frame: TargetFrame) {
        self.frames.push(frame);
    }

    fn added_frames(&self) -> &[TargetFrame] {
        &self.frames
    }

    fn save(&mut self) -> Result<()> {
        Err(ConvertError::Persist {
            path: self.path.clone(),
            reason: "read-only file".to_string(),
        })
    }
}

#[test]
fn test_tag_save_failure_is_reported_per_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.flac");
    touch(dir, "b.flac");

    let orchestrator = orchestrator(
        &[],
        &[
            ("a.flac", vec![("title", "Song A")]),
            ("b.flac", vec![("title", "Song B")]),
        ],
    )
    .with_container_opener(|path: &Path| -> Box<dyn TagContainer> {
        if path.file_name().is_some_and(|name| name == "a.mp3") {
            Box::new(ReadOnlyContainer {
                path: path.to_path_buf(),
                frames: Vec::new(),
            })
        } else {
            Box::new(Id3Container::open(path))
        }
    });
    let mut batch = orchestrator.run_batch(dir, "192k").unwrap();
    let events: Vec<ProgressEvent> = batch.by_ref().collect();

    let error = events
        .iter()
        .find(|e| e.message.starts_with("ERROR: "))
        .unwrap();
    assert_eq!(error.percent, 50);
    assert!(error.message.starts_with("ERROR: Failed to save tags to"));
    assert!(events.contains(&event(100, "Converting b.flac...")));
    assert!(events.contains(&event(100, "Adding TIT2 (Title) with value Song B ...")));
    assert_eq!(events.last(), Some(&event(100, "Conversion complete.")));

    assert_eq!(batch.summary().tag_errors, 1);
    assert_eq!(batch.summary().files_converted, 2);
    let tag = id3::Tag::read_from_path(dir.join("b.mp3")).unwrap();
    assert_eq!(tag.title(), Some("Song B"));
}

#[test]
fn test_unreadable_metadata_is_reported_per_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.flac");
    touch(dir, "b.flac");

    let orchestrator = orchestrator(&[], &[("b.flac", vec![("title", "Song B")])]);
    let mut batch = orchestrator.run_batch(dir, "192k").unwrap();
    let events: Vec<ProgressEvent> = batch.by_ref().collect();

    assert_eq!(events[0], event(50, "Converting a.flac..."));
    assert_eq!(events[1].percent, 50);
    assert!(events[1].message.starts_with("ERROR: Unreadable metadata in"));
    assert_eq!(events[2], event(100, "Converting b.flac..."));
    assert_eq!(batch.summary().tag_errors, 1);
    assert_eq!(batch.summary().files_converted, 2);
}

#[test]
fn test_unmatched_tags_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.flac");

    let orchestrator = orchestrator(
        &[],
        &[("a.flac", vec![("comment", "ripped"), ("title", "Song A")])],
    );
    let mut batch = orchestrator.run_batch(dir, "192k").unwrap();
    let messages: Vec<String> = batch.by_ref().map(|e| e.message).collect();

    assert_eq!(messages[1], "Unable to match comment to an ID3 frame");
    assert_eq!(messages[2], "Adding TIT2 (Title) with value Song A ...");
    assert_eq!(batch.summary().tags_skipped, 1);
}

#[test]
fn test_same_directory_gives_same_events() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.flac");
    touch(dir, "b.flac");

    let orchestrator = orchestrator(&["b"], &[("a.flac", vec![("title", "Song A")])]);
    let first: Vec<ProgressEvent> = orchestrator.run_batch(dir, "192k").unwrap().collect();
    let second: Vec<ProgressEvent> = orchestrator.run_batch(dir, "192k").unwrap().collect();

    assert_eq!(first, second);
}

#[test]
fn test_invalid_directory_fails_before_any_event() {
    let temp_dir = TempDir::new().unwrap();
    let file = touch(temp_dir.path(), "a.flac");
    let orchestrator = orchestrator(&[], &[]);

    let result = orchestrator.run_batch(&file, "192k");
    assert!(matches!(result, Err(ConvertError::InvalidDirectory(_))));

    let missing = temp_dir.path().join("missing");
    let result = orchestrator.run_batch(&missing, "192k");
    assert!(matches!(result, Err(ConvertError::InvalidDirectory(_))));
}

#[test]
fn test_drained_run_stays_exhausted() {
    let temp_dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&[], &[]);
    let mut batch = orchestrator.run_batch(temp_dir.path(), "192k").unwrap();

    while batch.next().is_some() {}
    assert_eq!(batch.next(), None);
}
