//! Converter module: classify, route, run.
//!
//! [`FileConverter`] is the entry point. A call to
//! [`FileConverter::convert`] classifies both paths, routes the pair to a
//! plan, runs the chosen handler, and returns whether it worked.
//!
//! # Example
//!
//! ```ignore
//! use fileconv_core::converter::FileConverter;
//!
//! let converter = FileConverter::with_defaults();
//!
//! // Office documents go through LibreOffice, then get renamed.
//! let outcome = converter.try_convert("/tmp/src.pdf", "/tmp/result.docx").await?;
//! println!("Served by {} in {} ms", outcome.handler, outcome.duration_ms);
//!
//! // Or just the boolean, with a diagnostic line on stderr on failure.
//! if !converter.convert("notes.md", "notes.html").await {
//!     std::process::exit(1);
//! }
//! ```

mod error;
mod file_converter;
mod types;

pub use error::{ConvertError, IoOp};
pub use file_converter::FileConverter;
pub use types::{ConversionJob, ConversionOutcome};
