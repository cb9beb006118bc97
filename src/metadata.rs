//! # Metadata Extraction Module
//!
//! Questo modulo legge tag ed immagini embedded da un file FLAC sorgente e li
//! riporta in una forma canonica, indipendente dalla libreria di parsing.
//!
//! ## Responsabilità:
//! - Apre il file solo per i metadata (niente decodifica audio)
//! - Normalizza le chiavi dei Vorbis comment in minuscolo
//! - Preserva l'ordine dichiarato nel file, sia delle chiavi che dei valori multipli
//! - Estrae tutti i blocchi PICTURE con mime, ruolo e descrizione
//!
//! ## Strutture dati:
//! - `CanonicalTagSet`: chiavi → valori (ordinati) + immagini embedded
//! - `EmbeddedImage`: una singola immagine (copertina, retro, ecc.)
//! - `MetadataReader`: trait per sostituire il lettore nei test

use crate::error::{ConvertError, Result};
use lofty::flac::FlacFile;
use lofty::ogg::OggPictureStorage;
use lofty::{AudioFile, ParseOptions};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// An image block embedded in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub mime_type: String,
    /// Picture type as defined by ID3v2 APIC / FLAC PICTURE (3 = front cover)
    pub image_role: u8,
    pub description: String,
    pub raw_bytes: Vec<u8>,
}

/// All tags and images of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTagSet {
    tags: Vec<(String, Vec<String>)>,
    images: Vec<EmbeddedImage>,
}

impl CanonicalTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; repeated keys accumulate values in insertion order
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.tags.push((key, vec![value])),
        }
    }

    pub fn push_image(&mut self, image: EmbeddedImage) {
        self.images.push(image);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = key.to_lowercase();
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Tags in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Reads the canonical metadata of a source file
pub trait MetadataReader: Send {
    fn extract(&self, path: &Path) -> Result<CanonicalTagSet>;
}

/// `MetadataReader` for FLAC files backed by `lofty`
#[derive(Debug, Clone, Copy, Default)]
pub struct FlacMetadataReader;

impl MetadataReader for FlacMetadataReader {
    fn extract(&self, path: &Path) -> Result<CanonicalTagSet> {
        let unreadable = |reason: String| ConvertError::UnreadableMetadata {
            path: path.to_path_buf(),
            reason,
        };

        let mut file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
        let flac = FlacFile::read_from(&mut file, ParseOptions::new().read_properties(false))
            .map_err(|e| unreadable(e.to_string()))?;

        let mut tags = CanonicalTagSet::new();
        if let Some(comments) = flac.vorbis_comments() {
            for (key, value) in comments.items() {
                tags.push(key, value);
            }
        }

        for (picture, _) in flac.pictures() {
            tags.push_image(EmbeddedImage {
                mime_type: picture
                    .mime_type()
                    .map(|mime| mime.as_str().to_string())
                    .unwrap_or_default(),
                image_role: picture.pic_type().as_u8(),
                description: picture.description().unwrap_or_default().to_string(),
                raw_bytes: picture.data().to_vec(),
            });
        }

        debug!(
            "Read {} tags and {} pictures from {}",
            tags.len(),
            tags.images().len(),
            path.display()
        );
        Ok(tags)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_push_accumulates_repeated_keys() {
        let mut tags = CanonicalTagSet::new();
        tags.push("ARTIST", "First");
        tags.push("title", "Song");
        tags.push("Artist", "Second");

        let keys: Vec<&str> = tags.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["artist", "title"]);
        assert_eq!(tags.get("artist").unwrap(), &["First", "Second"]);
    }

    #[test]
    fn test_extract_reads_comments_and_pictures() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("track.flac");
        let bytes = fixtures::flac_bytes(
            &[("TITLE", "Intro"), ("ARTIST", "A"), ("ARTIST", "B")],
            &[(3, "image/png", "Front", &[0x89, 0x50, 0x4e, 0x47])],
        );
        std::fs::write(&path, bytes).unwrap();

        let tags = FlacMetadataReader.extract(&path).unwrap();

        assert_eq!(tags.get("title").unwrap(), &["Intro"]);
        assert_eq!(tags.get("artist").unwrap(), &["A", "B"]);
        assert_eq!(tags.images().len(), 1);
        let image = &tags.images()[0];
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.image_role, 3);
        assert_eq!(image.description, "Front");
        assert_eq!(image.raw_bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn test_extract_rejects_non_flac() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.flac");
        std::fs::write(&path, b"definitely not a flac file").unwrap();

        let err = FlacMetadataReader.extract(&path).unwrap_err();
        assert!(matches!(err, ConvertError::UnreadableMetadata { .. }));
    }

    #[test]
    fn test_extract_missing_file() {
        let err = FlacMetadataReader
            .extract(Path::new("/nonexistent/file.flac"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnreadableMetadata { .. }));
    }
}
