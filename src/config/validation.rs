//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the registry URL
//! - Validate value ranges (timeouts > 0, download default within max)
//! - Keep the request timeout above the worst-case registry enrichment
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("registry.base_url must be an http(s) URL, got '{0}'")]
    InvalidRegistryUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("speed.default_download_bytes ({default}) exceeds speed.max_download_bytes ({max})")]
    DownloadDefaultTooLarge { default: usize, max: usize },

    #[error(
        "timeouts.request_secs ({request}) must exceed twice registry.timeout_secs ({registry}), \
         an ?ip= lookup makes two registry calls"
    )]
    RequestTimeoutTooShort { request: u64, registry: u64 },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    match url::Url::parse(&config.registry.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidRegistryUrl(
            config.registry.base_url.clone(),
        )),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs"));
    }
    if config.registry.timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("registry.timeout_secs"));
    }
    if config.timeouts.request_secs > 0
        && config.timeouts.request_secs <= config.registry.timeout_secs.saturating_mul(2)
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.timeouts.request_secs,
            registry: config.registry.timeout_secs,
        });
    }

    if config.speed.default_download_bytes > config.speed.max_download_bytes {
        errors.push(ValidationError::DownloadDefaultTooLarge {
            default: config.speed.default_download_bytes,
            max: config.speed.max_download_bytes,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
