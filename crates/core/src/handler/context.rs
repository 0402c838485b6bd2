//! Shared plumbing between the tool-driving handlers.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::{TimeoutConfig, ToolsConfig};
use crate::converter::{ConvertError, IoOp};
use crate::format::Category;
use crate::runner::{RunnerError, Tool, ToolOutput, ToolProbeResult, ToolRunner, WaitPolicy};

/// Runner plus the configuration every external handler needs.
pub struct ToolContext<R: ?Sized> {
    runner: Arc<R>,
    tools: ToolsConfig,
    timeouts: TimeoutConfig,
}

// Manual impl: `R` itself need not be `Clone`.
impl<R: ?Sized> Clone for ToolContext<R> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
            tools: self.tools.clone(),
            timeouts: self.timeouts.clone(),
        }
    }
}

impl<R: ToolRunner + ?Sized> ToolContext<R> {
    pub fn new(runner: Arc<R>, tools: ToolsConfig, timeouts: TimeoutConfig) -> Self {
        Self {
            runner,
            tools,
            timeouts,
        }
    }

    /// Configured program for a tool.
    pub fn program(&self, tool: Tool) -> &Path {
        self.tools.program(tool)
    }

    /// Default wait for markup and media runs.
    pub fn conversion_wait(&self) -> WaitPolicy {
        WaitPolicy::Bounded(self.timeouts.conversion())
    }

    /// Probes a tool, failing with `ToolMissing` when it is unavailable.
    pub async fn require(&self, tool: Tool) -> Result<ToolProbeResult, ConvertError> {
        let probe = self
            .runner
            .probe(self.program(tool), tool.probe_args(), self.timeouts.probe())
            .await;

        if !probe.available {
            return Err(ConvertError::ToolMissing { tool });
        }

        debug!(
            tool = %tool,
            version = probe.version.as_deref().unwrap_or("unknown"),
            "Tool available"
        );
        Ok(probe)
    }

    /// Runs a tool and returns its output whatever the exit code.
    pub async fn run(
        &self,
        tool: Tool,
        category: Category,
        args: &[OsString],
        wait: WaitPolicy,
    ) -> Result<ToolOutput, ConvertError> {
        let program = self.program(tool);
        self.runner
            .run(program, args, wait)
            .await
            .map_err(|e| match e {
                RunnerError::Spawn { program, source } => {
                    ConvertError::io(IoOp::Spawn, program, source)
                }
                timeout @ RunnerError::Timeout { .. } => {
                    ConvertError::external(tool, category, None, timeout.to_string())
                }
                RunnerError::Io(source) => ConvertError::io(IoOp::Spawn, program, source),
            })
    }

    /// Runs a tool and fails with `ExternalFailure` unless it exits 0.
    pub async fn run_checked(
        &self,
        tool: Tool,
        category: Category,
        args: &[OsString],
        wait: WaitPolicy,
    ) -> Result<ToolOutput, ConvertError> {
        let output = self.run(tool, category, args, wait).await?;
        if !output.success() {
            return Err(ConvertError::external(
                tool,
                category,
                output.exit_code,
                output.stderr,
            ));
        }
        Ok(output)
    }
}

/// A path as a single argv token, bytes unchanged.
pub(crate) fn path_arg(path: &Path) -> OsString {
    path.as_os_str().to_os_string()
}
