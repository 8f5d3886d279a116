//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (OPTIONS short-circuit, ordered lookup)
//!     → matcher.rs (evaluate method + pattern)
//!     → Return: handler response or not-found
//!
//! Route Registration (at startup):
//!     register(method, pattern, handler)
//!     → compile regex
//!     → append in order
//!     → share as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

use thiserror::Error;

pub use router::{Handler, RouteEntry, Router};

/// Errors raised while registering routes.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
