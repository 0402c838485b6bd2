//! Error types for the converter module.

use std::error::Error as _;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::{Category, Format};
use crate::runner::Tool;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    Remove,
    Rename,
    Spawn,
    Resolve,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Remove => "remove",
            Self::Rename => "rename",
            Self::Spawn => "spawn",
            Self::Resolve => "resolve",
        })
    }
}

/// Errors that can occur during a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A path's extension is missing or not recognized.
    #[error("Unknown file format: {path}")]
    UnknownFormat { path: PathBuf },

    /// No handler serves this pair.
    #[error("Conversion not supported: {input} -> {output}")]
    UnsupportedPair { input: Format, output: Format },

    /// The required tool's probe failed.
    #[error("{tool} is not installed")]
    ToolMissing { tool: Tool },

    /// The tool ran and reported failure.
    #[error(
        "{tool} failed during {category} conversion ({}): {}",
        describe_exit(.exit_code),
        last_line(.stderr)
    )]
    ExternalFailure {
        tool: Tool,
        category: Category,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The office tool finished but its output never appeared.
    #[error("Output file not found after conversion: {expected}")]
    OutputNotFound { expected: PathBuf },

    /// An OS-level file operation failed.
    #[error("Failed to {op} {path}")]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON document could not be parsed.
    #[error("Failed to parse JSON document {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// Creates an I/O error for an operation on a path.
    pub fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Creates an external failure error.
    pub fn external(
        tool: Tool,
        category: Category,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExternalFailure {
            tool,
            category,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Renders the error and its source chain on one line.
    pub fn diagnostic(&self) -> String {
        let mut line = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            line.push_str(": ");
            line.push_str(&cause.to_string());
            source = cause.source();
        }
        line.replace(['\n', '\r'], " ")
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated".to_string(),
    }
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or("no error output")
}
