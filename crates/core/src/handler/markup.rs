//! Pandoc-backed markup handler.

use async_trait::async_trait;
use std::ffi::OsString;

use super::context::{path_arg, ToolContext};
use super::traits::Handler;
use crate::converter::{ConversionJob, ConvertError};
use crate::format::{Category, Format};
use crate::runner::{Tool, ToolRunner};

/// Converts between markup formats with pandoc.
pub struct MarkupHandler<R: ?Sized> {
    ctx: ToolContext<R>,
}

impl<R: ToolRunner + ?Sized> MarkupHandler<R> {
    pub fn new(ctx: ToolContext<R>) -> Self {
        Self { ctx }
    }

    /// Pandoc reader/writer name for a markup format.
    pub fn format_flag(format: Format) -> &'static str {
        match format {
            Format::Txt => "plain",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Html => "html",
            Format::Md => "markdown",
            _ => "plain",
        }
    }

    /// Builds pandoc arguments for a job.
    pub fn build_args(job: &ConversionJob) -> Vec<OsString> {
        vec![
            path_arg(&job.input_path),
            "-f".into(),
            Self::format_flag(job.input_format).into(),
            "-t".into(),
            Self::format_flag(job.output_format).into(),
            "-o".into(),
            path_arg(&job.output_path),
        ]
    }
}

#[async_trait]
impl<R: ToolRunner + ?Sized> Handler for MarkupHandler<R> {
    fn name(&self) -> &str {
        "markup"
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        self.ctx.require(Tool::Pandoc).await?;
        let args = Self::build_args(job);
        self.ctx
            .run_checked(Tool::Pandoc, Category::Markup, &args, self.ctx.conversion_wait())
            .await?;
        Ok(())
    }
}
