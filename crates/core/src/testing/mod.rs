//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`ToolRunner`](crate::runner::ToolRunner) so
//! the whole dispatch path can be exercised without pandoc, ImageMagick,
//! FFmpeg or LibreOffice installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use fileconv_core::testing::MockRunner;
//!
//! let runner = MockRunner::new();
//! runner.set_available("pandoc", false).await;
//! runner
//!     .on_run("soffice", |args| {
//!         // pretend to be LibreOffice
//!         ToolOutput::ok()
//!     })
//!     .await;
//! ```

mod mock_runner;

pub use mock_runner::{InvocationKind, MockRunner, RecordedInvocation};
