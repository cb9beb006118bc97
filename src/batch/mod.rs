//! # Batch Module
//!
//! Modulo che separa le responsabilità del batch in sottomoduli:
//! - `orchestrator`: `BatchOrchestrator` e l'iteratore lazy `BatchRun`
//!
//! Qui vivono anche i tipi condivisi con il livello di presentazione:
//! `ProgressEvent` e `BatchSummary`.

pub mod orchestrator;

pub use orchestrator::{BatchOrchestrator, BatchRun, ContainerOpener};

use serde::Serialize;

pub const COMPLETE_MESSAGE: &str = "Conversion complete.";

/// One progress/log line of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// 0..=100
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            message: message.into(),
        }
    }
}

/// Counters accumulated while a batch is drained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files_found: usize,
    pub files_converted: usize,
    pub conversions_failed: usize,
    /// Files converted but whose tags could not be read or saved
    pub tag_errors: usize,
    /// Tags skipped across all files
    pub tags_skipped: usize,
}

impl BatchSummary {
    pub fn format_summary(&self) -> String {
        format!(
            "Found: {} files | Converted: {} | Failed: {} | Tag errors: {} | Tags skipped: {}",
            self.files_found,
            self.files_converted,
            self.conversions_failed,
            self.tag_errors,
            self.tags_skipped
        )
    }
}

/// `floor((index + 1) / total * 100)`; 100 when there is nothing to do
pub fn percent_for(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (((index + 1) * 100) / total).min(100) as u8
}
