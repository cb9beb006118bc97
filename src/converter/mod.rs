//! # Conversion Module
//!
//! Gestisce la conversione di un singolo file FLAC in MP3.
//!
//! ## Responsabilità:
//! - Deriva il path di output (stesso stem, estensione `mp3`, stessa directory)
//! - Invoca il motore di transcodifica esterno (`ffmpeg`)
//! - Valida il risultato: il motore deve riuscire, il file deve esistere e non essere vuoto
//! - Rimuove l'output parziale di una conversione fallita
//!
//! ## Sottomoduli:
//! - `ffmpeg`: `FfmpegTranscoder`, il sottoprocesso ffmpeg
//! - `path_resolver`: calcolo dei path di output
//!
//! Una conversione fallita non è un errore per il chiamante: `transcode`
//! ritorna `None` e il batch lo registra come warning.

pub mod ffmpeg;
pub mod path_resolver;

pub use ffmpeg::FfmpegTranscoder;
pub use path_resolver::PathResolver;

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SOURCE_EXTENSION: &str = "flac";
pub const TARGET_EXTENSION: &str = "mp3";
pub const DEFAULT_BITRATE: &str = "192k";

/// External transcoding engine
pub trait Transcoder: Send {
    fn transcode(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()>;
}

/// Converts one file and checks the output
pub struct ConversionDriver {
    transcoder: Box<dyn Transcoder>,
}

impl ConversionDriver {
    pub fn new(transcoder: Box<dyn Transcoder>) -> Self {
        Self { transcoder }
    }

    /// Driver backed by ffmpeg at `ffmpeg_path`
    pub fn ffmpeg(ffmpeg_path: PathBuf) -> Self {
        Self::new(Box::new(FfmpegTranscoder::new(ffmpeg_path)))
    }

    /// Convert `input` at `bitrate`.
    ///
    /// Returns the output path only if the engine succeeded and the output
    /// exists and is not empty. A failed run leaves no output behind.
    pub fn transcode(&self, input: &Path, bitrate: &str, output: Option<&Path>) -> Option<PathBuf> {
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => PathResolver::output_path_for(input, TARGET_EXTENSION),
        };

        info!(
            "Converting {} => {}...",
            PathResolver::file_name(input),
            PathResolver::file_name(&output)
        );

        if let Err(e) = self.transcoder.transcode(input, &output, bitrate) {
            warn!("Conversion of {} failed: {}", input.display(), e);
            Self::remove_partial_output(&output);
            return None;
        }

        match std::fs::metadata(&output) {
            Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Some(output),
            Ok(_) => {
                debug!("Output {} is empty", output.display());
                None
            }
            Err(e) => {
                debug!("Output {} is missing: {}", output.display(), e);
                None
            }
        }
    }

    fn remove_partial_output(output: &Path) {
        if !output.is_file() {
            return;
        }
        match std::fs::remove_file(output) {
            Ok(()) => debug!("Removed partial output {}", output.display()),
            Err(e) => warn!("Failed to remove partial output {}: {}", output.display(), e),
        }
    }
}
