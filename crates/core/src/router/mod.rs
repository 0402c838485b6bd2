//! Router module: decides which handler serves an (input, output) pair.
//!
//! Routing is a pure function of the two formats plus the set of
//! registered pairs. Rules are evaluated in order:
//!
//! 1. either side `Unknown` → [`RouteError::UnknownFormat`]
//! 2. JSON → TXT → [`Plan::StructuredToText`]
//! 3. both Markup → [`Plan::Markup`]
//! 4. both Image → [`Plan::Image`]
//! 5. both Audio → [`Plan::Audio`]
//! 6. both Video → [`Plan::Video`]
//! 7. both Office → [`Plan::Office`]
//! 8. pair registered → [`Plan::Registered`]
//! 9. otherwise → [`RouteError::UnsupportedPair`]

mod plan;

pub use plan::{route, Plan, RouteError};
