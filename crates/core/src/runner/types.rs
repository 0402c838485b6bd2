//! Types for the runner module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An external tool the handlers know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Markup converter.
    Pandoc,
    /// ImageMagick.
    Magick,
    /// Audio and video transcoder.
    Ffmpeg,
    /// LibreOffice in headless mode.
    Soffice,
}

impl Tool {
    /// Canonical program name, used as the default path.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pandoc => "pandoc",
            Self::Magick => "magick",
            Self::Ffmpeg => "ffmpeg",
            Self::Soffice => "soffice",
        }
    }

    /// Arguments of the version probe.
    pub fn probe_args(&self) -> &'static [&'static str] {
        match self {
            Self::Pandoc | Self::Soffice => &["--version"],
            Self::Magick | Self::Ffmpeg => &["-version"],
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a version probe.
///
/// Produced fresh on every conversion; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolProbeResult {
    /// Whether the probe exited with code 0.
    pub available: bool,
    /// First non-empty line of the probe's stdout, when available.
    pub version: Option<String>,
}

impl ToolProbeResult {
    /// A probe that found the tool.
    pub fn available(version: Option<String>) -> Self {
        Self {
            available: true,
            version,
        }
    }

    /// A probe that did not find the tool.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Builds a probe result from captured output.
    pub fn from_output(output: &ToolOutput) -> Self {
        if !output.success() {
            return Self::unavailable();
        }
        let version = output
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);
        Self::available(version)
    }
}

/// How long a run may take before the child is killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Wait at most this long.
    Bounded(Duration),
    /// Wait until the child exits on its own.
    Unbounded,
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with empty streams.
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            ..Default::default()
        }
    }

    /// A failed run with the given code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
