//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom della libreria.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi, con il path coinvolto
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - **Fatali prima dell'avvio**: `DependencyMissing`, `MappingLoad`,
//!   `MappingParse`, `DuplicateMapping`, `InvalidDirectory`
//! - **Fatali per singolo file**: `UnreadableMetadata`, `Persist`
//!   (il batch li registra come log e passa al file successivo)
//! - **Lookup**: `UnknownTag` quando una chiave non è nella tabella
//!
//! ## Esempio:
//! ```rust,ignore
//! if resolver.ffmpeg().is_none() {
//!     return Err(ConvertError::DependencyMissing("ffmpeg".to_string()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for conversion and tag translation
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error trying to load the ID3 frame mappings {path}: {source}")]
    MappingLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ID3 frame mappings in {path}: {source}")]
    MappingParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate mapping for source key '{0}'")]
    DuplicateMapping(String),

    #[error("{0} is not a known source tag")]
    UnknownTag(String),

    #[error("Unreadable metadata in {path}: {reason}")]
    UnreadableMetadata { path: PathBuf, reason: String },

    #[error("Dependency missing: {0}")]
    DependencyMissing(String),

    #[error("{0} is not a directory")]
    InvalidDirectory(PathBuf),

    #[error("FFmpeg error: {0}")]
    Transcode(String),

    #[error("Failed to save tags to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
