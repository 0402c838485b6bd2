//! Runner module for driving external command-line tools.
//!
//! This module provides the `ToolRunner` trait and a process-backed
//! implementation. A runner only knows how to probe a program and run it
//! with a token list; which tool and which arguments is decided by the
//! handlers.
//!
//! # Features
//!
//! - Version probes that never fail, only report availability
//! - Bounded or unbounded waits per invocation
//! - Full capture of stdout and stderr
//! - No shell interpolation, no working-directory changes, inherited environment
//!
//! # Example
//!
//! ```ignore
//! use fileconv_core::runner::{ProcessRunner, Tool, ToolRunner, WaitPolicy};
//!
//! let runner = ProcessRunner::new();
//!
//! let probe = runner.probe(Path::new("ffmpeg"), Tool::Ffmpeg.probe_args(), timeout).await;
//! if probe.available {
//!     let output = runner
//!         .run(Path::new("ffmpeg"), &args, WaitPolicy::Bounded(timeout))
//!         .await?;
//!     println!("exit code: {:?}", output.exit_code);
//! }
//! ```

mod error;
mod process;
mod traits;
mod types;

pub use error::RunnerError;
pub use process::ProcessRunner;
pub use traits::ToolRunner;
pub use types::{Tool, ToolOutput, ToolProbeResult, WaitPolicy};
