//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the locator.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locator service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// RDAP registry client settings.
    pub registry: RegistryConfig,

    /// Trusted edge headers carrying the platform request context.
    pub edge: EdgeHeaderConfig,

    /// Speed-test payload limits.
    pub speed: SpeedTestConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// RDAP registry client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the RDAP service, without trailing slash.
    pub base_url: String,

    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent to the registry.
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rdap.org".to_string(),
            timeout_secs: 5,
            user_agent: concat!("edge-locator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Names of the trusted headers an edge proxy uses to forward its
/// pre-resolved request metadata.
///
/// Defaults follow Cloudflare's visitor location headers. ASN, bot score and
/// the EU flag have no standard header and use `x-edge-*` names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeHeaderConfig {
    /// Parse edge headers into a request context.
    pub trust_headers: bool,
    pub continent: String,
    pub country: String,
    pub is_eu_country: String,
    pub city: String,
    pub postal_code: String,
    pub metro_code: String,
    pub region: String,
    pub region_code: String,
    pub timezone: String,
    pub latitude: String,
    pub longitude: String,
    pub asn: String,
    pub bot_score: String,
}

impl Default for EdgeHeaderConfig {
    fn default() -> Self {
        Self {
            trust_headers: true,
            continent: "cf-ipcontinent".to_string(),
            country: "cf-ipcountry".to_string(),
            is_eu_country: "x-edge-is-eu-country".to_string(),
            city: "cf-ipcity".to_string(),
            postal_code: "cf-postal-code".to_string(),
            metro_code: "cf-metro-code".to_string(),
            region: "cf-region".to_string(),
            region_code: "cf-region-code".to_string(),
            timezone: "cf-timezone".to_string(),
            latitude: "cf-iplatitude".to_string(),
            longitude: "cf-iplongitude".to_string(),
            asn: "x-edge-asn".to_string(),
            bot_score: "x-edge-bot-score".to_string(),
        }
    }
}

/// Speed-test configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeedTestConfig {
    /// Download size when the request does not ask for one.
    pub default_download_bytes: usize,

    /// Largest download payload served.
    pub max_download_bytes: usize,

    /// Largest upload body accepted.
    pub max_upload_bytes: usize,
}

impl Default for SpeedTestConfig {
    fn default() -> Self {
        Self {
            default_download_bytes: 100_000,
            max_download_bytes: 25 * 1024 * 1024, // 25MB
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
