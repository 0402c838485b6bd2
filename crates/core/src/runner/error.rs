//! Error types for the runner module.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running an external tool.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program could not be started.
    #[error("Failed to spawn {program}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program did not finish within its wait bound and was killed.
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: PathBuf, timeout: Duration },

    /// I/O error while waiting for the program.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Creates a spawn error.
    pub fn spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Whether the program itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
