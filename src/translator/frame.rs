//! ID3 frames produced by the translator and the classification of frame
//! identifiers into frame kinds.

use std::fmt;

/// ID3v2 text frames a mapping may target
const TEXT_FRAMES: &[&str] = &[
    "TALB", "TBPM", "TCMP", "TCOM", "TCON", "TCOP", "TDAT", "TDEN", "TDLY", "TDOR", "TDRC",
    "TDRL", "TDTG", "TENC", "TEXT", "TFLT", "TIME", "TIPL", "TIT1", "TIT2", "TIT3", "TKEY",
    "TLAN", "TLEN", "TMCL", "TMED", "TMOO", "TOAL", "TOFN", "TOLY", "TOPE", "TORY", "TOWN",
    "TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPRO", "TPUB", "TRCK", "TRDA", "TRSN", "TRSO",
    "TSIZ", "TSO2", "TSOA", "TSOC", "TSOP", "TSOT", "TSRC", "TSSE", "TSST", "TYER",
];

/// ID3v2 URL link frames
const URL_FRAMES: &[&str] = &[
    "WCOM", "WCOP", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
];

/// A typed unit written into the destination tag container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFrame {
    /// Standard text frame, e.g. `TIT2`
    PlainText { frame_id: String, values: Vec<String> },
    /// `TXXX` with its description
    UserText {
        description: String,
        values: Vec<String>,
    },
    /// URL link frame (`WOAR`, `WXXX`, ...)
    Url { frame_id: String, url: String },
    /// `APIC`
    Picture {
        mime_type: String,
        image_role: u8,
        description: String,
        data: Vec<u8>,
    },
}

impl TargetFrame {
    /// The four-character ID3 identifier
    pub fn frame_id(&self) -> &str {
        match self {
            Self::PlainText { frame_id, .. } | Self::Url { frame_id, .. } => frame_id,
            Self::UserText { .. } => "TXXX",
            Self::Picture { .. } => "APIC",
        }
    }
}

impl fmt::Display for TargetFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserText { description, .. } => write!(f, "TXXX:{}", description),
            Self::Picture { description, .. } => write!(f, "APIC:{}", description),
            other => f.write_str(other.frame_id()),
        }
    }
}

/// Kind of frame a mapping target identifier designates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind<'a> {
    /// `TXXX:<description>`; `None` when the description is missing
    UserText(Option<&'a str>),
    Url(&'a str),
    PlainText(&'a str),
    Unknown,
}

impl<'a> FrameKind<'a> {
    /// Classify a resolved target identifier such as `TIT2`, `WOAR` or `TXXX:ASIN`
    pub fn classify(target: &'a str) -> Self {
        let (id, rest) = match target.split_once(':') {
            Some((id, rest)) => (id, Some(rest)),
            None => (target, None),
        };

        if id == "TXXX" {
            return Self::UserText(rest.filter(|d| !d.is_empty()));
        }
        if URL_FRAMES.contains(&id) {
            return Self::Url(id);
        }
        if rest.is_none() && TEXT_FRAMES.contains(&id) {
            return Self::PlainText(id);
        }
        Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_text() {
        assert_eq!(
            FrameKind::classify("TXXX:MusicBrainz Album Id"),
            FrameKind::UserText(Some("MusicBrainz Album Id"))
        );
        assert_eq!(
            FrameKind::classify("TXXX:my:field"),
            FrameKind::UserText(Some("my:field"))
        );
        assert_eq!(FrameKind::classify("TXXX"), FrameKind::UserText(None));
        assert_eq!(FrameKind::classify("TXXX:"), FrameKind::UserText(None));
    }

    #[test]
    fn test_classify_urls_and_text() {
        assert_eq!(FrameKind::classify("WOAR"), FrameKind::Url("WOAR"));
        assert_eq!(FrameKind::classify("WXXX:homepage"), FrameKind::Url("WXXX"));
        assert_eq!(FrameKind::classify("TIT2"), FrameKind::PlainText("TIT2"));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(FrameKind::classify("ZZZZ"), FrameKind::Unknown);
        assert_eq!(FrameKind::classify("UFID:http://musicbrainz.org"), FrameKind::Unknown);
        assert_eq!(FrameKind::classify("TIT2:extra"), FrameKind::Unknown);
        assert_eq!(FrameKind::classify(""), FrameKind::Unknown);
    }

    #[test]
    fn test_display() {
        let frame = TargetFrame::UserText {
            description: "ASIN".to_string(),
            values: vec!["B000".to_string()],
        };
        assert_eq!(frame.to_string(), "TXXX:ASIN");
        assert_eq!(frame.frame_id(), "TXXX");
    }
}
