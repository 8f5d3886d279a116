//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → location edge-context middleware
//!     → routing::Router (method + pattern dispatch)
//!     → handlers.rs (extract, enrich, format)
//!     → CORS headers added on the way out
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use handlers::Services;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};
