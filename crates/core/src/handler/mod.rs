//! Handler module: one handler per category plus the in-process ones.
//!
//! | Handler | Serves | Tool |
//! |---|---|---|
//! | [`MarkupHandler`] | markup pairs | pandoc |
//! | [`MediaHandler`] | image / audio / video pairs | magick / ffmpeg |
//! | [`OfficeHandler`] | office pairs | soffice |
//! | [`JsonFlattener`] | JSON → TXT | none |
//! | [`ByteSubstitution`] | TXT ↔ CSV (registered) | none |
//!
//! Tool-driving handlers share a [`ToolContext`] holding the runner and the
//! configured program paths, and always probe before they run.

mod context;
mod flatten;
mod markup;
mod media;
mod office;
mod registry;
mod traits;

pub use context::ToolContext;
pub use flatten::{flatten_json, JsonFlattener};
pub use markup::MarkupHandler;
pub use media::MediaHandler;
pub use office::OfficeHandler;
pub use registry::{ByteSubstitution, HandlerRegistry};
pub use traits::Handler;
