//! # Batch Orchestrator
//!
//! Orchestratore principale: converte tutti i FLAC di una directory e copia
//! i tag, un file alla volta, producendo una sequenza lazy di `ProgressEvent`.
//!
//! ## Stati di `BatchRun`:
//! `Announce(i)` → `Convert(i)` → ... → `Finish` → `Done`
//!
//! Ogni chiamata a `next` esegue al massimo una unità di lavoro bloccante
//! (la conversione di un file) oppure consegna una riga di log già pronta.

use super::{percent_for, BatchSummary, ProgressEvent, COMPLETE_MESSAGE};
use crate::converter::{ConversionDriver, PathResolver, SOURCE_EXTENSION};
use crate::error::{ConvertError, Result};
use crate::file_manager::FileManager;
use crate::metadata::{FlacMetadataReader, MetadataReader};
use crate::translator::{Id3Container, TagContainer, TagTranslator};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Opens the destination tag container of a converted file
pub type ContainerOpener = Box<dyn Fn(&Path) -> Box<dyn TagContainer> + Send>;

/// Sequences conversion and tag copy for every source file of a directory
pub struct BatchOrchestrator {
    driver: ConversionDriver,
    reader: Box<dyn MetadataReader>,
    translator: TagTranslator,
    open_container: ContainerOpener,
}

impl BatchOrchestrator {
    pub fn new(
        driver: ConversionDriver,
        reader: Box<dyn MetadataReader>,
        translator: TagTranslator,
    ) -> Self {
        Self {
            driver,
            reader,
            translator,
            open_container: Box::new(open_id3),
        }
    }

    /// Replace the ID3 container used for converted files
    pub fn with_container_opener<F>(mut self, open: F) -> Self
    where
        F: Fn(&Path) -> Box<dyn TagContainer> + Send + 'static,
    {
        self.open_container = Box::new(open);
        self
    }

    /// ffmpeg for conversion, lofty for FLAC metadata
    pub fn with_ffmpeg(ffmpeg_path: PathBuf, translator: TagTranslator) -> Self {
        Self::new(
            ConversionDriver::ffmpeg(ffmpeg_path),
            Box::new(FlacMetadataReader),
            translator,
        )
    }

    /// Start a batch over `directory`.
    ///
    /// Fails immediately with `InvalidDirectory` when `directory` is not a
    /// directory; nothing is converted until the returned run is iterated.
    pub fn run_batch(&self, directory: &Path, bitrate: &str) -> Result<BatchRun<'_>> {
        if !directory.is_dir() {
            return Err(ConvertError::InvalidDirectory(directory.to_path_buf()));
        }

        let files = FileManager::find_source_files(directory, SOURCE_EXTENSION)?;
        info!(
            "Batch of {} .{} files in {} at {}",
            files.len(),
            SOURCE_EXTENSION,
            directory.display(),
            bitrate
        );

        let phase = if files.is_empty() {
            Phase::Finish
        } else {
            Phase::Announce(0)
        };

        Ok(BatchRun {
            orchestrator: self,
            directory: directory.to_path_buf(),
            bitrate: bitrate.to_string(),
            summary: BatchSummary {
                files_found: files.len(),
                ..Default::default()
            },
            files,
            converted: Vec::new(),
            phase,
            pending: VecDeque::new(),
        })
    }
}

fn open_id3(path: &Path) -> Box<dyn TagContainer> {
    Box::new(Id3Container::open(path))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Announce(usize),
    Convert(usize),
    Finish,
    Done,
}

/// Lazy, single-pass sequence of progress events for one batch
pub struct BatchRun<'a> {
    orchestrator: &'a BatchOrchestrator,
    directory: PathBuf,
    bitrate: String,
    files: Vec<PathBuf>,
    converted: Vec<PathBuf>,
    phase: Phase,
    pending: VecDeque<ProgressEvent>,
    summary: BatchSummary,
}

impl<'a> BatchRun<'a> {
    /// Source files in processing order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Sources whose MP3 this run produced, in processing order
    pub fn converted_sources(&self) -> &[PathBuf] {
        &self.converted
    }

    /// Counters so far; final once the run is drained
    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Convert file `index` and tag the result; returns its log events
    fn process_file(&mut self, index: usize) -> Vec<ProgressEvent> {
        let percent = percent_for(index, self.files.len());
        let source = &self.files[index];
        let name = PathResolver::file_name(source);
        let orchestrator = self.orchestrator;

        let Some(output) = orchestrator.driver.transcode(source, &self.bitrate, None) else {
            warn!("Conversion of {} appears unsuccessful", source.display());
            self.summary.conversions_failed += 1;
            return vec![ProgressEvent::new(
                percent,
                format!("WARNING: Conversion of {} appears unsuccessful", name),
            )];
        };
        self.summary.files_converted += 1;
        self.converted.push(source.clone());

        let tags = match orchestrator.reader.extract(source) {
            Ok(tags) => tags,
            Err(e) => {
                warn!("{}", e);
                self.summary.tag_errors += 1;
                return vec![ProgressEvent::new(percent, format!("ERROR: {}", e))];
            }
        };

        let mut log = Vec::new();
        let mut container = (orchestrator.open_container)(&output);
        match orchestrator
            .translator
            .translate_and_write(&tags, container.as_mut(), |message| log.push(message))
        {
            Ok(report) => {
                debug!(
                    "{}: {} frames, {} pictures, {} skipped",
                    name,
                    report.frames_added,
                    report.pictures_added,
                    report.issues.len()
                );
                self.summary.tags_skipped += report.issues.len();
            }
            Err(e) => {
                warn!("{}", e);
                self.summary.tag_errors += 1;
                log.push(format!("ERROR: {}", e));
            }
        }

        log.into_iter()
            .map(|message| ProgressEvent::new(percent, message))
            .collect()
    }
}

impl<'a> Iterator for BatchRun<'a> {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            match self.phase {
                Phase::Announce(index) => {
                    self.phase = Phase::Convert(index);
                    let name = PathResolver::file_name(&self.files[index]);
                    return Some(ProgressEvent::new(
                        percent_for(index, self.files.len()),
                        format!("Converting {}...", name),
                    ));
                }
                Phase::Convert(index) => {
                    let events = self.process_file(index);
                    self.pending.extend(events);
                    self.phase = if index + 1 < self.files.len() {
                        Phase::Announce(index + 1)
                    } else {
                        Phase::Finish
                    };
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    if self.files.is_empty() {
                        self.pending.push_back(ProgressEvent::new(
                            100,
                            format!("Nothing to convert in {}", self.directory.display()),
                        ));
                    }
                    info!("{}", self.summary.format_summary());
                    self.pending
                        .push_back(ProgressEvent::new(100, COMPLETE_MESSAGE));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<'a> FusedIterator for BatchRun<'a> {}
