//! Edge request locator library.

pub mod config;
pub mod format;
pub mod http;
pub mod lifecycle;
pub mod location;
pub mod observability;
pub mod registry;
pub mod routing;
pub mod security;
pub mod speed;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::RegistryClient;
