//! # Tag Mapping Module
//!
//! Questo modulo carica la tabella dichiarativa che associa una chiave di tag
//! FLAC (vocabolario EasyID3) a un frame ID3 di destinazione.
//!
//! ## Responsabilità:
//! - Caricamento della tabella da file JSON (o dalla tabella built-in)
//! - Normalizzazione delle chiavi in minuscolo
//! - Rifiuto di chiavi duplicate al caricamento
//! - Lookup case-insensitive di frame e descrizione
//!
//! ## Formato del file:
//! ```json
//! [
//!   { "source_key": "album", "target_frame": "TALB", "description": "Album/Movie/Show title" },
//!   { "source_key": "asin", "target_frame": "TXXX:ASIN", "description": "Amazon standard identification number" }
//! ]
//! ```
//! Sono accettati anche i nomi storici `easyID3_key` e `mp3_frame`.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const BUILTIN_MAPPINGS: &str = include_str!("../mappings/easyid3_frames.json");

/// One row of the mapping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(alias = "easyID3_key")]
    pub source_key: String,
    #[serde(alias = "mp3_frame")]
    pub target_frame: String,
    pub description: String,
}

/// Immutable lookup table from source tag key to ID3 frame
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>,
}

impl MappingTable {
    /// Load the table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConvertError::MappingLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<MappingEntry> =
            serde_json::from_str(&content).map_err(|source| ConvertError::MappingParse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded {} tag mappings from {}", entries.len(), path.display());
        Self::from_entries(entries)
    }

    /// Table shipped with the crate
    pub fn builtin() -> Result<Self> {
        let entries: Vec<MappingEntry> =
            serde_json::from_str(BUILTIN_MAPPINGS).map_err(|source| ConvertError::MappingParse {
                path: "<builtin>".into(),
                source,
            })?;
        Self::from_entries(entries)
    }

    /// Load from `path` when given, otherwise fall back to the built-in table
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn from_entries(entries: Vec<MappingEntry>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for mut entry in entries {
            entry.source_key = entry.source_key.to_lowercase();
            if index.contains_key(&entry.source_key) {
                return Err(ConvertError::DuplicateMapping(entry.source_key));
            }
            index.insert(entry.source_key.clone(), normalized.len());
            normalized.push(entry);
        }

        Ok(Self {
            entries: normalized,
            index,
        })
    }

    /// All source keys the table knows about
    pub fn known_keys(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.source_key.as_str()).collect()
    }

    /// Case-insensitive lookup of the frame for `source_key`
    pub fn resolve(&self, source_key: &str) -> Result<&MappingEntry> {
        self.index
            .get(&source_key.to_lowercase())
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ConvertError::UnknownTag(source_key.to_string()))
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
