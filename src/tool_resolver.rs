//! # Tool Path Resolver
//!
//! Finds the external transcoding engine (`ffmpeg`) before any batch work:
//! - Explicit path from configuration or the command line
//! - `TOOLS_DIR` environment variable (bundled tools)
//! - System `PATH`

use crate::error::{ConvertError, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const FFMPEG_PROGRAM: &str = "ffmpeg";

/// Tool path resolver for the transcoding engine
#[derive(Debug, Clone, Default)]
pub struct ToolPathResolver {
    /// Explicit ffmpeg path, wins over every other strategy
    ffmpeg_override: Option<PathBuf>,
    /// Directory holding bundled tools
    tools_dir: Option<PathBuf>,
}

impl ToolPathResolver {
    /// Create a resolver reading `TOOLS_DIR` from the environment
    pub fn new() -> Self {
        Self {
            ffmpeg_override: None,
            tools_dir: Self::detect_tools_dir(),
        }
    }

    pub fn with_ffmpeg(mut self, path: Option<PathBuf>) -> Self {
        self.ffmpeg_override = path;
        self
    }

    pub fn with_tools_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.tools_dir = dir;
        self
    }

    fn detect_tools_dir() -> Option<PathBuf> {
        let tools_path = PathBuf::from(env::var_os("TOOLS_DIR")?);
        debug!("Checking TOOLS_DIR environment variable: {:?}", tools_path);
        tools_path.is_dir().then_some(tools_path)
    }

    /// Resolve the path to a specific tool
    pub fn resolve_tool(&self, tool_name: &str) -> Option<PathBuf> {
        if tool_name == FFMPEG_PROGRAM {
            if let Some(ref path) = self.ffmpeg_override {
                if path.is_file() {
                    debug!("Using configured tool: {} -> {:?}", tool_name, path);
                    return Some(path.clone());
                }
                warn!("Configured {} path does not exist: {:?}", tool_name, path);
            }
        }

        if let Some(ref tools_dir) = self.tools_dir {
            let bundled_path = tools_dir.join(Self::executable_name(tool_name));
            if bundled_path.is_file() {
                debug!("Using bundled tool: {} -> {:?}", tool_name, bundled_path);
                return Some(bundled_path);
            }
        }

        if let Some(system_path) = Self::find_in_system_path(tool_name) {
            debug!("Using system tool: {} -> {:?}", tool_name, system_path);
            return Some(system_path);
        }

        warn!("Tool not found: {}", tool_name);
        None
    }

    fn executable_name(tool_name: &str) -> String {
        let extension = if cfg!(windows) { ".exe" } else { "" };
        format!("{}{}", tool_name, extension)
    }

    /// Find tool in system PATH
    fn find_in_system_path(tool_name: &str) -> Option<PathBuf> {
        let tool_with_ext = Self::executable_name(tool_name);

        env::split_paths(&env::var_os("PATH")?)
            .map(|dir| dir.join(&tool_with_ext))
            .find(|path| path.is_file())
    }

    /// Get path to ffmpeg tool
    pub fn ffmpeg(&self) -> Option<PathBuf> {
        self.resolve_tool(FFMPEG_PROGRAM)
    }

    /// Verify the transcoding engine is available; run once before a batch
    pub fn dependency_check(&self) -> Result<PathBuf> {
        self.check_tool_with_instructions(FFMPEG_PROGRAM)
    }

    /// Get installation instructions for a tool
    fn install_instructions(tool_name: &str) -> String {
        match tool_name {
            "ffmpeg" if cfg!(target_os = "macos") => "brew install ffmpeg".to_string(),
            "ffmpeg" if cfg!(windows) => "winget install ffmpeg".to_string(),
            "ffmpeg" => "sudo apt-get install ffmpeg".to_string(),
            _ => format!("sudo apt-get install {}", tool_name),
        }
    }

    /// Check if a tool is available and provide installation instructions if not
    pub fn check_tool_with_instructions(&self, tool_name: &str) -> Result<PathBuf> {
        self.resolve_tool(tool_name).ok_or_else(|| {
            ConvertError::DependencyMissing(format!(
                "{} is needed to convert FLAC files to MP3. To install it, run:\n  {}",
                tool_name,
                Self::install_instructions(tool_name)
            ))
        })
    }
}
