//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file del batch.
//!
//! ## Responsabilità:
//! - Discovery dei file sorgente in una directory (non ricorsiva)
//! - Ordinamento per nome per un'elaborazione deterministica
//! - Cancellazione opzionale degli originali già convertiti
//! - Formattazione human-readable delle dimensioni
//!
//! ## Operazioni sui file:
//! - `find_source_files()`: trova tutti i `*.flac` di una directory
//! - `has_extension()`: confronto case-insensitive dell'estensione
//! - `delete_converted_sources()`: rimuove i FLAC indicati che hanno un MP3 valido accanto
//! - `format_size()`: converte bytes in formato leggibile (KB, MB, GB)
//!
//! ## Esempio:
//! ```rust,no_run
//! use flac2mp3::file_manager::FileManager;
//! use std::path::Path;
//!
//! let files = FileManager::find_source_files(Path::new("/music/album"), "flac")?;
//! # Ok::<(), flac2mp3::ConvertError>(())
//! ```

use crate::converter::PathResolver;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Find all files with `extension` directly inside `dir`, sorted by name
    pub fn find_source_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && Self::has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }

        debug!("Found {} .{} files in {}", files.len(), extension, dir.display());
        Ok(files)
    }

    /// Case-insensitive extension check
    pub fn has_extension(path: &Path, extension: &str) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false)
    }

    /// Delete each of `sources` whose converted sibling exists and is not empty.
    ///
    /// Only the given files are touched; returns one log line per file.
    pub fn delete_converted_sources(sources: &[PathBuf], target_extension: &str) -> Vec<String> {
        let mut log = Vec::new();

        for source in sources {
            let converted = PathResolver::output_path_for(source, target_extension);
            let converted_ok = std::fs::metadata(&converted)
                .map(|m| m.is_file() && m.len() > 0)
                .unwrap_or(false);
            let name = PathResolver::file_name(source);

            if !converted_ok {
                log.push(format!("Keeping {} (no converted file)", name));
                continue;
            }

            let size = std::fs::metadata(source).map(|m| m.len()).unwrap_or(0);
            match std::fs::remove_file(source) {
                Ok(()) => log.push(format!("Deleted {} ({})", name, Self::format_size(size))),
                Err(e) => {
                    warn!("Failed to delete {}: {}", source.display(), e);
                    log.push(format!("Failed to delete {}: {}", name, e));
                }
            }
        }

        log
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
