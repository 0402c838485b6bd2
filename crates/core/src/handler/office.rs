//! LibreOffice-backed office document handler.
//!
//! `soffice --convert-to` picks its own output name (input stem plus the
//! target extension, inside `--outdir`), so after the run the handler moves
//! that file onto the requested output path.
//!
//! ```text
//! Probe -> Run -> Locate -> Rename -> Done
//!                   |
//!                   +-- (PDF -> DOCX only) Retry -> Locate -> Rename -> Done
//! ```

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::context::{path_arg, ToolContext};
use super::traits::Handler;
use crate::converter::{ConversionJob, ConvertError, IoOp};
use crate::format::{extension_of, Category, Format};
use crate::runner::{Tool, ToolOutput, ToolRunner, WaitPolicy};

/// Import filter that makes Writer, rather than Draw, open a PDF.
const PDF_IMPORT_FILTER: &str = "writer_pdf_import";

/// Converts office documents with LibreOffice.
pub struct OfficeHandler<R: ?Sized> {
    ctx: ToolContext<R>,
}

impl<R: ToolRunner + ?Sized> OfficeHandler<R> {
    pub fn new(ctx: ToolContext<R>) -> Self {
        Self { ctx }
    }

    /// Directory LibreOffice writes into: the requested output's parent.
    pub fn output_dir(job: &ConversionJob) -> PathBuf {
        job.output_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    /// Path LibreOffice will write for a job.
    ///
    /// For a same-format pair in one directory (`a.pdf -> b.pdf`) this is the
    /// input itself, so reconciliation moves the input onto the output even
    /// when the tool wrote nothing.
    pub fn expected_output(job: &ConversionJob) -> PathBuf {
        let mut name = job
            .input_path
            .file_stem()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(extension_of(job.output_format));
        Self::output_dir(job).join(name)
    }

    fn is_pdf_to_docx(job: &ConversionJob) -> bool {
        job.input_format == Format::Pdf && job.output_format == Format::Docx
    }

    /// Arguments of the first attempt.
    pub fn build_args(job: &ConversionJob) -> Vec<OsString> {
        let out_dir = path_arg(&Self::output_dir(job));
        let input = path_arg(&job.input_path);

        if Self::is_pdf_to_docx(job) {
            vec![
                "--headless".into(),
                format!("--infilter={}", PDF_IMPORT_FILTER).into(),
                "--convert-to".into(),
                "docx".into(),
                "--outdir".into(),
                out_dir,
                input,
            ]
        } else {
            vec![
                "--headless".into(),
                "--convert-to".into(),
                job.output_format.name().into(),
                "--outdir".into(),
                out_dir,
                input,
            ]
        }
    }

    /// Arguments of the PDF to DOCX retry, filter given as part of the target.
    pub fn build_retry_args(job: &ConversionJob) -> Vec<OsString> {
        vec![
            "--headless".into(),
            "--convert-to".into(),
            format!("docx:{}", PDF_IMPORT_FILTER).into(),
            "--outdir".into(),
            path_arg(&Self::output_dir(job)),
            path_arg(&job.input_path),
        ]
    }

    async fn attempt(&self, args: &[OsString]) -> Result<ToolOutput, ConvertError> {
        let output = self
            .ctx
            .run(Tool::Soffice, Category::Office, args, WaitPolicy::Unbounded)
            .await?;
        debug!(
            exit_code = ?output.exit_code,
            stdout = %output.stdout.trim(),
            stderr = %output.stderr.trim(),
            "LibreOffice finished"
        );
        Ok(output)
    }

    /// Moves the tool's output onto the requested path.
    ///
    /// Returns `Ok(false)` when the expected file does not exist.
    async fn reconcile(expected: &Path, requested: &Path) -> Result<bool, ConvertError> {
        let exists = fs::try_exists(expected)
            .await
            .map_err(|e| ConvertError::io(IoOp::Read, expected, e))?;
        if !exists {
            return Ok(false);
        }
        if expected == requested {
            return Ok(true);
        }

        match fs::remove_file(requested).await {
            Ok(()) => debug!(path = %requested.display(), "Removed existing output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ConvertError::io(IoOp::Remove, requested, e)),
        }

        fs::rename(expected, requested)
            .await
            .map_err(|e| ConvertError::io(IoOp::Rename, expected, e))?;
        debug!(
            from = %expected.display(),
            to = %requested.display(),
            "Renamed LibreOffice output"
        );
        Ok(true)
    }
}

#[async_trait]
impl<R: ToolRunner + ?Sized> Handler for OfficeHandler<R> {
    fn name(&self) -> &str {
        "office"
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        self.ctx.require(Tool::Soffice).await?;

        let expected = Self::expected_output(job);
        info!(
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            expected = %expected.display(),
            "Converting office document"
        );
        if expected == job.input_path {
            warn!(
                input = %job.input_path.display(),
                "Office output name equals the input, moving the input onto the output"
            );
        }

        let mut output = self.attempt(&Self::build_args(job)).await?;
        if Self::reconcile(&expected, &job.output_path).await? {
            return Ok(());
        }

        if Self::is_pdf_to_docx(job) {
            warn!(
                input = %job.input_path.display(),
                "PDF import produced no output, retrying with filter in target"
            );
            output = self.attempt(&Self::build_retry_args(job)).await?;
            if Self::reconcile(&expected, &job.output_path).await? {
                return Ok(());
            }
        }

        if output.success() {
            Err(ConvertError::OutputNotFound { expected })
        } else {
            Err(ConvertError::external(
                Tool::Soffice,
                Category::Office,
                output.exit_code,
                output.stderr,
            ))
        }
    }
}
