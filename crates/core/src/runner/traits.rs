//! Trait definitions for the runner module.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use super::error::RunnerError;
use super::types::{ToolOutput, ToolProbeResult, WaitPolicy};

/// Spawns external programs and captures their output.
///
/// Arguments are passed as a token list of OS strings, so paths reach the
/// program byte for byte; implementations must not route them through a
/// shell.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Returns the name of this runner implementation.
    fn name(&self) -> &str;

    /// Runs a version probe. Never fails: a program that cannot be spawned,
    /// exits non-zero, or exceeds `timeout` is reported as unavailable.
    async fn probe(&self, program: &Path, args: &[&str], timeout: Duration) -> ToolProbeResult;

    /// Runs `program` with `args` and waits according to `wait`.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`ToolOutput::exit_code`].
    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        wait: WaitPolicy,
    ) -> Result<ToolOutput, RunnerError>;
}
