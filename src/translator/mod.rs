//! # Tag Translator Module
//!
//! Converte i tag canonici di un file FLAC nei frame ID3 del file MP3 di
//! destinazione.
//!
//! ## Responsabilità:
//! - Filtra le chiavi sul vocabolario di riferimento (EasyID3)
//! - Risolve il frame di destinazione tramite la `MappingTable`
//! - Classifica il frame (`FrameKind`) e costruisce il `TargetFrame`
//! - Copia le immagini embedded come frame `APIC`
//! - Salva il container di destinazione
//!
//! ## Gestione errori:
//! Ogni tag produce un `Result<TargetFrame, TranslationIssue>`: i problemi su
//! un singolo tag vengono registrati nel log e nel report, la traduzione
//! prosegue. Solo il salvataggio del container può fallire.
//!
//! ## Sottomoduli:
//! - `frame`: `TargetFrame` e classificazione degli identificatori
//! - `container`: `TagContainer`, `Id3Container`, `MemoryContainer`

pub mod container;
pub mod frame;

pub use container::{Id3Container, MemoryContainer, TagContainer};
pub use frame::{FrameKind, TargetFrame};

use crate::error::Result;
use crate::mapping::{MappingEntry, MappingTable};
use crate::metadata::CanonicalTagSet;
use crate::vocabulary::ReferenceVocabulary;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Why a single source tag was not written
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationIssue {
    #[error("Unable to match {key} to an ID3 frame")]
    Unmatched { key: String },

    #[error("Frame {frame} not found in the ID3 frame set")]
    FrameNotFound { key: String, frame: String },

    #[error("Error adding tag {key} ({description}): {reason}")]
    Malformed {
        key: String,
        description: String,
        reason: String,
    },

    /// ID3 keeps one attached picture per picture type
    #[error("Skipping picture {description}: a picture of type {role} is already attached")]
    DuplicatePicture { description: String, role: u8 },
}

/// Outcome of one `translate_and_write` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub frames_added: usize,
    pub pictures_added: usize,
    pub issues: Vec<TranslationIssue>,
}

/// Translates canonical FLAC tags into ID3 frames
#[derive(Debug, Clone)]
pub struct TagTranslator {
    mapping: Arc<MappingTable>,
    vocabulary: ReferenceVocabulary,
}

impl TagTranslator {
    pub fn new(mapping: Arc<MappingTable>, vocabulary: ReferenceVocabulary) -> Self {
        Self {
            mapping,
            vocabulary,
        }
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Build the frame for one source tag
    pub fn translate_tag(
        &self,
        key: &str,
        values: &[String],
    ) -> std::result::Result<(TargetFrame, &MappingEntry), TranslationIssue> {
        let key = key.to_lowercase();
        if !self.vocabulary.contains(&key) {
            return Err(TranslationIssue::Unmatched { key });
        }

        let entry = self
            .mapping
            .resolve(&key)
            .map_err(|e| TranslationIssue::Malformed {
                key: key.clone(),
                description: String::new(),
                reason: e.to_string(),
            })?;

        let malformed = |reason: &str| TranslationIssue::Malformed {
            key: key.clone(),
            description: entry.description.clone(),
            reason: reason.to_string(),
        };

        if values.is_empty() {
            return Err(malformed("tag has no value"));
        }

        let frame = match FrameKind::classify(&entry.target_frame) {
            FrameKind::UserText(Some(description)) => TargetFrame::UserText {
                description: description.to_string(),
                values: values.to_vec(),
            },
            FrameKind::UserText(None) => {
                return Err(malformed("user text frame without description"));
            }
            FrameKind::Url(frame_id) => {
                let url = values[0].trim();
                if url.is_empty() {
                    return Err(malformed("empty URL"));
                }
                TargetFrame::Url {
                    frame_id: frame_id.to_string(),
                    url: url.to_string(),
                }
            }
            FrameKind::PlainText(frame_id) => TargetFrame::PlainText {
                frame_id: frame_id.to_string(),
                values: values.to_vec(),
            },
            FrameKind::Unknown => {
                return Err(TranslationIssue::FrameNotFound {
                    key: key.clone(),
                    frame: entry.target_frame.clone(),
                });
            }
        };

        Ok((frame, entry))
    }

    /// Translate every tag and image of `source` into `container`, then save it.
    ///
    /// Each log line is handed to `sink` in order. Per-tag problems are soft:
    /// they are logged, collected in the report, and skipped.
    pub fn translate_and_write<C, F>(
        &self,
        source: &CanonicalTagSet,
        container: &mut C,
        mut sink: F,
    ) -> Result<TranslationReport>
    where
        C: TagContainer + ?Sized,
        F: FnMut(String),
    {
        let mut report = TranslationReport::default();

        for (key, values) in source.iter() {
            match self.translate_tag(key, values) {
                Ok((frame, entry)) => {
                    sink(format!(
                        "Adding {} ({}) with value {} ...",
                        entry.target_frame,
                        entry.description,
                        format_values(values)
                    ));
                    container.add_frame(frame);
                    report.frames_added += 1;
                }
                Err(issue) => {
                    match &issue {
                        TranslationIssue::Unmatched { .. } => debug!("{}", issue),
                        _ => warn!("{}", issue),
                    }
                    sink(issue.to_string());
                    report.issues.push(issue);
                }
            }
        }

        if source.images().is_empty() {
            sink("No album cover to add".to_string());
        } else {
            let mut roles = HashSet::new();
            for image in source.images() {
                if !roles.insert(image.image_role) {
                    let issue = TranslationIssue::DuplicatePicture {
                        description: image.description.clone(),
                        role: image.image_role,
                    };
                    warn!("{}", issue);
                    sink(issue.to_string());
                    report.issues.push(issue);
                    continue;
                }
                sink(format!("Adding picture {}", image.description));
                container.add_frame(TargetFrame::Picture {
                    mime_type: image.mime_type.clone(),
                    image_role: image.image_role,
                    description: image.description.clone(),
                    data: image.raw_bytes.clone(),
                });
                report.pictures_added += 1;
            }
        }

        container.save()?;
        Ok(report)
    }
}

fn format_values(values: &[String]) -> String {
    match values {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    }
}
