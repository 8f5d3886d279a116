//! Request location subsystem.
//!
//! # Data Flow
//! ```text
//! edge headers / host extension
//!     → context.rs (EdgeContext request extension)
//!     → extract.rs (context + headers + optional registry lookup)
//!     → result.rs (LocationResult)
//!     → format (JSON / text / HTML)
//! ```

pub mod context;
pub mod extract;
pub mod result;

pub use context::{edge_context_middleware, EdgeContext};
pub use result::{AsnValue, LocationResult, Timestamp};
