//! Security subsystem.
//!
//! # Components
//! - `headers.rs`: cross-origin response headers applied to every response
//!
//! # Design Decisions
//! - No authentication: every endpoint is public
//! - Upload size is bounded by `speed.max_upload_bytes`

pub mod headers;

pub use headers::{with_cors, CORS_HEADERS};
