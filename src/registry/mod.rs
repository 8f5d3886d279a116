//! RDAP registry lookup subsystem.
//!
//! # Data Flow
//! ```text
//! ip / asn
//!     → client.rs (HTTP GET with timeout)
//!     → entity.rs (jCard → ContactEntity)
//!     → IpRecord / AsnInfo (placeholder on any failure)
//! ```

pub mod client;
pub mod entity;
pub mod types;

pub use client::{IpEnrichment, RegistryClient};
pub use types::{AsnInfo, ContactEntity, IpRecord, RegistryError, RegistryResult};
