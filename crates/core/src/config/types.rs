use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::runner::Tool;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
}

/// Program paths of the external tools.
///
/// Bare names are resolved through `PATH` by the OS.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default = "default_pandoc")]
    pub pandoc: PathBuf,
    #[serde(default = "default_magick")]
    pub magick: PathBuf,
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,
    #[serde(default = "default_soffice")]
    pub soffice: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pandoc: default_pandoc(),
            magick: default_magick(),
            ffmpeg: default_ffmpeg(),
            soffice: default_soffice(),
        }
    }
}

impl ToolsConfig {
    /// Returns the configured program for a tool.
    pub fn program(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Pandoc => &self.pandoc,
            Tool::Magick => &self.magick,
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Soffice => &self.soffice,
        }
    }

    /// Overrides the program for a tool.
    pub fn with_program(mut self, tool: Tool, program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        match tool {
            Tool::Pandoc => self.pandoc = program,
            Tool::Magick => self.magick = program,
            Tool::Ffmpeg => self.ffmpeg = program,
            Tool::Soffice => self.soffice = program,
        }
        self
    }
}

fn default_pandoc() -> PathBuf {
    PathBuf::from(Tool::Pandoc.name())
}

fn default_magick() -> PathBuf {
    PathBuf::from(Tool::Magick.name())
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from(Tool::Ffmpeg.name())
}

fn default_soffice() -> PathBuf {
    PathBuf::from(Tool::Soffice.name())
}

/// Wait bounds for child processes.
///
/// Office conversions are not bounded: a cold LibreOffice start can take
/// several seconds and there is nothing useful to do on expiry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutConfig {
    /// Bound for version probes, in seconds.
    #[serde(default = "default_probe_secs")]
    pub probe_secs: u64,
    /// Bound for markup and media conversions, in seconds.
    #[serde(default = "default_conversion_secs")]
    pub conversion_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_secs: default_probe_secs(),
            conversion_secs: default_conversion_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn conversion(&self) -> Duration {
        Duration::from_secs(self.conversion_secs)
    }
}

fn default_probe_secs() -> u64 {
    10
}

fn default_conversion_secs() -> u64 {
    3600 // 1 hour
}

/// Markup handling options.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkupConfig {
    /// Serve JSON to TXT and the TXT/CSV pairs in-process without consulting
    /// pandoc. When false, pandoc goes first and the in-process handlers are
    /// used only if pandoc is missing.
    #[serde(default = "default_true")]
    pub prefer_builtin: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            prefer_builtin: true,
        }
    }
}

fn default_true() -> bool {
    true
}
