//! Image, audio and video handlers.
//!
//! Audio and video share one tool and one argument shape; they stay separate
//! instances only so failures name the right category.

use async_trait::async_trait;
use std::ffi::OsString;

use super::context::{path_arg, ToolContext};
use super::traits::Handler;
use crate::converter::{ConversionJob, ConvertError};
use crate::format::Category;
use crate::runner::{Tool, ToolRunner};

/// Converts media files with ImageMagick or FFmpeg.
pub struct MediaHandler<R: ?Sized> {
    ctx: ToolContext<R>,
    category: Category,
}

impl<R: ToolRunner + ?Sized> MediaHandler<R> {
    /// ImageMagick-backed image handler.
    pub fn image(ctx: ToolContext<R>) -> Self {
        Self {
            ctx,
            category: Category::Image,
        }
    }

    /// FFmpeg-backed audio handler.
    pub fn audio(ctx: ToolContext<R>) -> Self {
        Self {
            ctx,
            category: Category::Audio,
        }
    }

    /// FFmpeg-backed video handler.
    pub fn video(ctx: ToolContext<R>) -> Self {
        Self {
            ctx,
            category: Category::Video,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The tool serving this handler's category.
    pub fn tool(&self) -> Tool {
        match self.category {
            Category::Image => Tool::Magick,
            _ => Tool::Ffmpeg,
        }
    }

    /// Builds the tool's arguments for a job.
    pub fn build_args(&self, job: &ConversionJob) -> Vec<OsString> {
        match self.tool() {
            Tool::Magick => vec![
                "convert".into(),
                path_arg(&job.input_path),
                path_arg(&job.output_path),
            ],
            _ => vec![
                "-i".into(),
                path_arg(&job.input_path),
                "-y".into(), // Overwrite output
                path_arg(&job.output_path),
            ],
        }
    }
}

#[async_trait]
impl<R: ToolRunner + ?Sized> Handler for MediaHandler<R> {
    fn name(&self) -> &str {
        self.category.name()
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let tool = self.tool();
        self.ctx.require(tool).await?;
        let args = self.build_args(job);
        self.ctx
            .run_checked(tool, self.category, &args, self.ctx.conversion_wait())
            .await?;
        Ok(())
    }
}
