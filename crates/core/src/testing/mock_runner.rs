//! Mock runner for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::runner::{RunnerError, ToolOutput, ToolProbeResult, ToolRunner, WaitPolicy};

type RunScript = Arc<dyn Fn(&[String]) -> ToolOutput + Send + Sync>;

/// Whether an invocation was a probe or a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    Probe,
    Run,
}

/// A recorded invocation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub kind: InvocationKind,
    pub program: PathBuf,
    /// Arguments rendered lossily, for string comparisons.
    pub args: Vec<String>,
    /// Arguments exactly as the runner received them.
    pub raw_args: Vec<OsString>,
    /// Wait policy of a run; `None` for probes.
    pub wait: Option<WaitPolicy>,
}

impl RecordedInvocation {
    /// File name of the program, e.g. `"pandoc"`.
    pub fn tool(&self) -> String {
        tool_key(&self.program)
    }
}

/// Mock implementation of the ToolRunner trait.
///
/// Tools are keyed by the file name of the program path, so a default
/// configuration addresses them as `"pandoc"`, `"magick"`, `"ffmpeg"` and
/// `"soffice"`. Every tool is available and every run exits 0 unless
/// configured otherwise.
#[derive(Clone, Default)]
pub struct MockRunner {
    /// Recorded invocations, in order.
    invocations: Arc<RwLock<Vec<RecordedInvocation>>>,
    /// Tools whose probe fails.
    unavailable: Arc<RwLock<HashSet<String>>>,
    /// Persistent run behavior per tool.
    scripts: Arc<RwLock<HashMap<String, RunScript>>>,
    /// One-shot run behaviors per tool, consumed before the persistent one.
    queued: Arc<RwLock<HashMap<String, VecDeque<RunScript>>>>,
}

impl fmt::Debug for MockRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRunner").finish_non_exhaustive()
    }
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a tool as installed or missing.
    pub async fn set_available(&self, tool: &str, available: bool) {
        let mut unavailable = self.unavailable.write().await;
        if available {
            unavailable.remove(tool);
        } else {
            unavailable.insert(tool.to_string());
        }
    }

    /// Sets what every run of `tool` does.
    pub async fn on_run<F>(&self, tool: &str, script: F)
    where
        F: Fn(&[String]) -> ToolOutput + Send + Sync + 'static,
    {
        self.scripts
            .write()
            .await
            .insert(tool.to_string(), Arc::new(script));
    }

    /// Queues what the next unscripted run of `tool` does.
    pub async fn on_run_once<F>(&self, tool: &str, script: F)
    where
        F: Fn(&[String]) -> ToolOutput + Send + Sync + 'static,
    {
        self.queued
            .write()
            .await
            .entry(tool.to_string())
            .or_default()
            .push_back(Arc::new(script));
    }

    /// All recorded invocations.
    pub async fn invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.read().await.clone()
    }

    /// Recorded runs (probes excluded).
    pub async fn runs(&self) -> Vec<RecordedInvocation> {
        self.invocations
            .read()
            .await
            .iter()
            .filter(|i| i.kind == InvocationKind::Run)
            .cloned()
            .collect()
    }

    /// Recorded probes.
    pub async fn probes(&self) -> Vec<RecordedInvocation> {
        self.invocations
            .read()
            .await
            .iter()
            .filter(|i| i.kind == InvocationKind::Probe)
            .cloned()
            .collect()
    }

    /// Forgets recorded invocations.
    pub async fn clear(&self) {
        self.invocations.write().await.clear();
    }

    async fn next_script(&self, tool: &str) -> Option<RunScript> {
        if let Some(queue) = self.queued.write().await.get_mut(tool) {
            if let Some(script) = queue.pop_front() {
                return Some(script);
            }
        }
        self.scripts.read().await.get(tool).cloned()
    }
}

fn tool_key(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl ToolRunner for MockRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, program: &Path, args: &[&str], _timeout: Duration) -> ToolProbeResult {
        self.invocations.write().await.push(RecordedInvocation {
            kind: InvocationKind::Probe,
            program: program.to_path_buf(),
            args: args.iter().map(|a| a.to_string()).collect(),
            raw_args: args.iter().map(OsString::from).collect(),
            wait: None,
        });

        let tool = tool_key(program);
        if self.unavailable.read().await.contains(&tool) {
            ToolProbeResult::unavailable()
        } else {
            ToolProbeResult::available(Some(format!("{} (mock)", tool)))
        }
    }

    async fn run(
        &self,
        program: &Path,
        args: &[OsString],
        wait: WaitPolicy,
    ) -> Result<ToolOutput, RunnerError> {
        let lossy: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.invocations.write().await.push(RecordedInvocation {
            kind: InvocationKind::Run,
            program: program.to_path_buf(),
            args: lossy.clone(),
            raw_args: args.to_vec(),
            wait: Some(wait),
        });

        let tool = tool_key(program);
        if self.unavailable.read().await.contains(&tool) {
            return Err(RunnerError::spawn(
                program,
                std::io::Error::new(std::io::ErrorKind::NotFound, "mock tool not installed"),
            ));
        }

        Ok(match self.next_script(&tool).await {
            Some(script) => script(&lossy),
            None => ToolOutput::ok(),
        })
    }
}
