//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri della conversione
//! - Fornisce validazione dei parametri di input
//! - Supporta il caricamento della configurazione da file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `bitrate`: Bitrate MP3 (default: "192k")
//! - `mapping_file`: Tabella di mapping alternativa (default: None = tabella integrata)
//! - `ffmpeg_path`: Eseguibile ffmpeg esplicito (default: None = ricerca nel PATH)
//! - `delete_originals`: Cancella i FLAC convertiti a fine batch (default: false)
//! - `json_output`: Output JSON per uso programmatico (default: false)
//!
//! ## Validazione:
//! - Controlla che bitrate sia nel formato `<kbps>k`, tra 32k e 320k
//! - Controlla che i path espliciti esistano
//!
//! ## Esempio:
//! ```rust
//! use flac2mp3::Config;
//!
//! let config = Config {
//!     bitrate: "256k".to_string(),
//!     ..Default::default()
//! };
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::converter::DEFAULT_BITRATE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MIN_BITRATE_KBPS: u32 = 32;
const MAX_BITRATE_KBPS: u32 = 320;

/// Configuration for a conversion batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// MP3 bitrate, e.g. "192k"
    pub bitrate: String,
    /// Mapping table file (None = built-in table)
    pub mapping_file: Option<PathBuf>,
    /// Explicit ffmpeg executable (None = search PATH)
    pub ffmpeg_path: Option<PathBuf>,
    /// Delete sources whose MP3 was produced
    pub delete_originals: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bitrate: DEFAULT_BITRATE.to_string(),
            mapping_file: None,
            ffmpeg_path: None,
            delete_originals: false,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let kbps = self
            .bitrate
            .strip_suffix('k')
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| {
                anyhow::anyhow!("Bitrate must look like \"192k\", got \"{}\"", self.bitrate)
            })?;

        if !(MIN_BITRATE_KBPS..=MAX_BITRATE_KBPS).contains(&kbps) {
            return Err(anyhow::anyhow!(
                "Bitrate must be between {}k and {}k",
                MIN_BITRATE_KBPS,
                MAX_BITRATE_KBPS
            ));
        }

        if let Some(ref mapping_file) = self.mapping_file {
            if !mapping_file.is_file() {
                return Err(anyhow::anyhow!(
                    "Mapping file does not exist: {}",
                    mapping_file.display()
                ));
            }
        }

        if let Some(ref ffmpeg_path) = self.ffmpeg_path {
            if !ffmpeg_path.exists() {
                return Err(anyhow::anyhow!(
                    "ffmpeg path does not exist: {}",
                    ffmpeg_path.display()
                ));
            }
        }

        Ok(())
    }

    /// `<config dir>/flac2mp3/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flac2mp3").join("config.json"))
    }

    /// Load configuration from file; not validated, call `validate` after overrides
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
