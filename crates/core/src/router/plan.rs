//! Plan type and the routing rule table.

use thiserror::Error;

use crate::format::{Category, Format};

/// The router's decision for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Markup { input: Format, output: Format },
    Image,
    Audio,
    Video,
    Office { input: Format, output: Format },
    StructuredToText,
    Registered { input: Format, output: Format },
}

impl Plan {
    /// Category whose handler serves this plan, if the plan is category-specific.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Markup { .. } | Self::StructuredToText => Some(Category::Markup),
            Self::Image => Some(Category::Image),
            Self::Audio => Some(Category::Audio),
            Self::Video => Some(Category::Video),
            Self::Office { .. } => Some(Category::Office),
            Self::Registered { .. } => None,
        }
    }
}

/// Why no plan could be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Unknown file format ({input} -> {output})")]
    UnknownFormat { input: Format, output: Format },

    #[error("Conversion not supported: {input} -> {output}")]
    UnsupportedPair { input: Format, output: Format },
}

/// Routes a format pair to a plan.
///
/// `is_registered` reports whether a handler is registered for a pair; it is
/// consulted only after every category rule has failed.
pub fn route(
    input: Format,
    output: Format,
    is_registered: impl Fn(Format, Format) -> bool,
) -> Result<Plan, RouteError> {
    if input.is_unknown() || output.is_unknown() {
        return Err(RouteError::UnknownFormat { input, output });
    }

    if input == Format::Json && output == Format::Txt {
        return Ok(Plan::StructuredToText);
    }

    let shared = match (input.category(), output.category()) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    };

    match shared {
        Some(Category::Markup) => Ok(Plan::Markup { input, output }),
        Some(Category::Image) => Ok(Plan::Image),
        Some(Category::Audio) => Ok(Plan::Audio),
        Some(Category::Video) => Ok(Plan::Video),
        Some(Category::Office) => Ok(Plan::Office { input, output }),
        None if is_registered(input, output) => Ok(Plan::Registered { input, output }),
        None => Err(RouteError::UnsupportedPair { input, output }),
    }
}
