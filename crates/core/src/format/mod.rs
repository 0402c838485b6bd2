//! Format classification by file extension.
//!
//! Every path is mapped to a [`Format`] tag purely from the suffix after the
//! last `.` of its final segment. Nothing here touches the filesystem.
//!
//! # Example
//!
//! ```ignore
//! use fileconv_core::format::{classify, extension_of, Category, Format};
//!
//! assert_eq!(classify("/a/B.TxT"), Format::Txt);
//! assert_eq!(classify("/a/B.jpeg"), Format::Jpg);
//! assert_eq!(extension_of(Format::Tiff), ".tiff");
//! assert_eq!(Format::Mkv.category(), Some(Category::Video));
//! ```

mod classify;
mod types;

pub use classify::{classify, extension_of};
pub use types::{Category, Format};
