//! Reference vocabulary of simplified destination keys.
//!
//! The translator only considers source tags whose lower-cased key appears
//! here. The default set is the EasyID3 key vocabulary; callers can inject
//! their own.

use std::collections::HashSet;

const EASY_ID3_KEYS: &[&str] = &[
    "album",
    "bpm",
    "compilation",
    "composer",
    "copyright",
    "encodedby",
    "lyricist",
    "length",
    "media",
    "mood",
    "grouping",
    "title",
    "version",
    "artist",
    "albumartist",
    "conductor",
    "arranger",
    "discnumber",
    "organization",
    "tracknumber",
    "author",
    "albumartistsort",
    "albumsort",
    "composersort",
    "artistsort",
    "titlesort",
    "isrc",
    "discsubtitle",
    "language",
    "genre",
    "date",
    "originaldate",
    "website",
    "musicbrainz_trackid",
    "musicbrainz_artistid",
    "musicbrainz_albumid",
    "musicbrainz_albumartistid",
    "musicbrainz_trmid",
    "musicip_puid",
    "musicip_fingerprint",
    "musicbrainz_albumstatus",
    "musicbrainz_albumtype",
    "releasecountry",
    "musicbrainz_discid",
    "asin",
    "barcode",
    "catalognumber",
    "musicbrainz_releasetrackid",
    "musicbrainz_releasegroupid",
    "musicbrainz_workid",
    "acoustid_fingerprint",
    "acoustid_id",
];

/// Set of recognized destination keys
#[derive(Debug, Clone, Default)]
pub struct ReferenceVocabulary {
    keys: HashSet<String>,
}

impl ReferenceVocabulary {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The EasyID3 vocabulary
    pub fn easy_id3() -> Self {
        Self::new(EASY_ID3_KEYS.iter().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
