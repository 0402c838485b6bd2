//! Process-backed runner implementation.

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::error::RunnerError;
use super::traits::ToolRunner;
use super::types::{ToolOutput, ToolProbeResult, WaitPolicy};

/// Runs tools as direct child processes of the current process.
///
/// The child inherits the environment and working directory unchanged.
/// Stdin is closed so a tool can never block waiting for input.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    async fn spawn_and_wait<I, S>(
        program: &Path,
        args: I,
        wait: WaitPolicy,
    ) -> Result<ToolOutput, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunnerError::spawn(program, e))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match wait {
            WaitPolicy::Bounded(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(RunnerError::Timeout {
                        program: program.to_path_buf(),
                        timeout: limit,
                    })
                }
            },
            WaitPolicy::Unbounded => child.wait_with_output().await?,
        };

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    async fn probe(&self, program: &Path, args: &[&str], timeout: Duration) -> ToolProbeResult {
        match Self::spawn_and_wait(program, args, WaitPolicy::Bounded(timeout)).await {
            Ok(output) => {
                let probe = ToolProbeResult::from_output(&output);
                debug!(
                    program = %program.display(),
                    available = probe.available,
                    version = probe.version.as_deref().unwrap_or(""),
                    "Probed tool"
                );
                probe
            }
            Err(e) => {
                debug!(program = %program.display(), error = %e, "Tool probe failed");
                ToolProbeResult::unavailable()
            }
        }
    }

    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        wait: WaitPolicy,
    ) -> Result<ToolOutput, RunnerError> {
        debug!(program = %program.display(), ?args, ?wait, "Running tool");
        let output = Self::spawn_and_wait(program, args, wait).await?;
        debug!(
            program = %program.display(),
            exit_code = ?output.exit_code,
            "Tool finished"
        );
        Ok(output)
    }
}
