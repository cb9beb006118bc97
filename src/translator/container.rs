//! Destination tag containers.
//!
//! `Id3Container` wraps an `id3::Tag` bound to an MP3 path and writes
//! ID3v2.4 on save. `MemoryContainer` keeps frames in memory only.

use super::frame::TargetFrame;
use crate::error::{ConvertError, Result};
use id3::frame::{Content, ExtendedLink, ExtendedText, Picture, PictureType};
use id3::{Frame, Tag, TagLike, Version};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata container of a destination file, populated then persisted
pub trait TagContainer {
    fn add_frame(&mut self, frame: TargetFrame);

    /// Frames added since the container was opened
    fn added_frames(&self) -> &[TargetFrame];

    fn save(&mut self) -> Result<()>;
}

/// ID3v2 tag of an MP3 file
pub struct Id3Container {
    path: PathBuf,
    tag: Tag,
    added: Vec<TargetFrame>,
}

impl Id3Container {
    /// Open the tag of `path`, starting from an empty tag when none is present
    pub fn open(path: &Path) -> Self {
        let tag = Tag::read_from_path(path).unwrap_or_else(|e| {
            debug!("No readable ID3 tag in {}: {}", path.display(), e);
            Tag::new()
        });

        Self {
            path: path.to_path_buf(),
            tag,
            added: Vec::new(),
        }
    }
}

impl TagContainer for Id3Container {
    fn add_frame(&mut self, frame: TargetFrame) {
        match &frame {
            TargetFrame::PlainText { frame_id, values } => {
                self.tag.add_frame(Frame::with_content(
                    frame_id.as_str(),
                    Content::Text(values.join("\0")),
                ));
            }
            TargetFrame::UserText {
                description,
                values,
            } => {
                self.tag.add_frame(ExtendedText {
                    description: description.clone(),
                    value: values.join("\0"),
                });
            }
            TargetFrame::Url { frame_id, url } if frame_id == "WXXX" => {
                self.tag.add_frame(ExtendedLink {
                    description: String::new(),
                    link: url.clone(),
                });
            }
            TargetFrame::Url { frame_id, url } => {
                self.tag.add_frame(Frame::with_content(
                    frame_id.as_str(),
                    Content::Link(url.clone()),
                ));
            }
            TargetFrame::Picture {
                mime_type,
                image_role,
                description,
                data,
            } => {
                self.tag.add_frame(Picture {
                    mime_type: mime_type.clone(),
                    picture_type: picture_type(*image_role),
                    description: description.clone(),
                    data: data.clone(),
                });
            }
        }
        self.added.push(frame);
    }

    fn added_frames(&self) -> &[TargetFrame] {
        &self.added
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(|e| ConvertError::Persist {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        debug!("Saved {} frames to {}", self.added.len(), self.path.display());
        Ok(())
    }
}

/// In-memory container; frames are never persisted
#[derive(Debug, Default)]
pub struct MemoryContainer {
    frames: Vec<TargetFrame>,
    saves: usize,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` was called
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TagContainer for MemoryContainer {
    fn add_frame(&mut self, frame: TargetFrame) {
        self.frames.push(frame);
    }

    fn added_frames(&self) -> &[TargetFrame] {
        &self.frames
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

fn picture_type(role: u8) -> PictureType {
    match role {
        0 => PictureType::Other,
        1 => PictureType::Icon,
        2 => PictureType::OtherIcon,
        3 => PictureType::CoverFront,
        4 => PictureType::CoverBack,
        5 => PictureType::Leaflet,
        6 => PictureType::Media,
        7 => PictureType::LeadArtist,
        8 => PictureType::Artist,
        9 => PictureType::Conductor,
        10 => PictureType::Band,
        11 => PictureType::Composer,
        12 => PictureType::Lyricist,
        13 => PictureType::RecordingLocation,
        14 => PictureType::DuringRecording,
        15 => PictureType::DuringPerformance,
        16 => PictureType::ScreenCapture,
        17 => PictureType::BrightFish,
        18 => PictureType::Illustration,
        19 => PictureType::BandLogo,
        20 => PictureType::PublisherLogo,
        other => PictureType::Undefined(other),
    }
}
