//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path di output: il file convertito è un
//! sibling del sorgente, stesso stem, estensione di destinazione.

use std::path::{Path, PathBuf};

pub struct PathResolver;

impl PathResolver {
    /// `<dir>/<stem>.<extension>` for `input`
    pub fn output_path_for(input: &Path, extension: &str) -> PathBuf {
        input.with_extension(extension)
    }

    /// Display name of a file (the last path component)
    pub fn file_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}
