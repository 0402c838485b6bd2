//! Types for the converter module.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::error::{ConvertError, IoOp};
use crate::format::{classify, Category, Format};

/// One conversion request, resolved to absolute paths and classified.
///
/// Built at the start of a conversion and dropped at its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_format: Format,
    pub output_format: Format,
    /// Shared category of both formats, if any.
    pub category: Option<Category>,
}

impl ConversionJob {
    /// Classifies both paths and makes them absolute.
    ///
    /// The paths are not required to exist.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let input_path = absolutize(input.as_ref())?;
        let output_path = absolutize(output.as_ref())?;
        let input_format = classify(&input_path);
        let output_format = classify(&output_path);

        let category = match (input_format.category(), output_format.category()) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        };

        Ok(Self {
            input_path,
            output_path,
            input_format,
            output_format,
            category,
        })
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, ConvertError> {
    // No extension to classify, and nothing to resolve.
    if path.as_os_str().is_empty() {
        return Err(ConvertError::UnknownFormat {
            path: PathBuf::new(),
        });
    }
    std::path::absolute(path).map_err(|e| ConvertError::io(IoOp::Resolve, path, e))
}

/// Summary of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_format: Format,
    pub output_format: Format,
    /// Name of the handler that served the job.
    pub handler: String,
    pub duration_ms: u64,
}
