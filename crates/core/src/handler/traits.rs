//! Trait definitions for the handler module.

use async_trait::async_trait;

use crate::converter::{ConversionJob, ConvertError};

/// Performs one kind of conversion.
///
/// Every category handler, registered pair and the JSON flattener share this
/// capability; the router decides which one a job reaches.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Returns the name of this handler.
    fn name(&self) -> &str;

    /// Converts `job.input_path` into `job.output_path`.
    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError>;
}
