//! FFmpeg subprocess handling for FLAC → MP3 transcoding

use super::Transcoder;
use crate::args;
use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// Runs `ffmpeg` with the LAME MP3 encoder
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg: PathBuf) -> Self {
        Self { ffmpeg }
    }

    /// Build the command line for one conversion
    ///
    /// -vn              : drop the cover art video stream
    /// -map_metadata -1 : drop source tags, the translator writes them
    /// -codec:a         : LAME MP3 encoder
    /// -b:a             : target bitrate
    /// -y               : overwrite the output without asking
    fn command(&self, input: &Path, output: &Path, bitrate: &str) -> Command {
        let loglevel = if tracing::enabled!(tracing::Level::DEBUG) {
            "info"
        } else {
            "error"
        };

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(args!["-hide_banner", "-nostdin", "-loglevel", loglevel, "-i"])
            .arg(input)
            .args(args![
                "-vn",
                "-map_metadata",
                "-1",
                "-codec:a",
                "libmp3lame",
                "-b:a",
                bitrate,
                "-y"
            ])
            .arg(output);
        cmd
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()> {
        let start_time = Instant::now();

        let result = self
            .command(input, output, bitrate)
            .output()
            .map_err(|e| {
                ConvertError::Transcode(format!("Failed to execute {}: {}", self.ffmpeg.display(), e))
            })?;

        let duration = start_time.elapsed();

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConvertError::Transcode(format!(
                "ffmpeg exited with {} after {:.1}s: {}",
                result.status,
                duration.as_secs_f64(),
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        debug!(
            "ffmpeg converted {} in {:.1}s",
            input.display(),
            duration.as_secs_f64()
        );
        Ok(())
    }
}
