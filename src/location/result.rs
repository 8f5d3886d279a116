//! Per-request location result.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::registry::{AsnInfo, ContactEntity};

/// Sentinel for an IP header the JSON/HTML path looked for but did not find.
pub const UNKNOWN: &str = "Unknown";

/// Extraction time. The JSON/HTML path uses ISO-8601, the text path Unix
/// seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Iso(String),
    Unix(i64),
}

impl Timestamp {
    pub fn iso(now: DateTime<Utc>) -> Self {
        Timestamp::Iso(now.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn unix(now: DateTime<Utc>) -> Self {
        Timestamp::Unix(now.timestamp())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Iso(s) => f.write_str(s),
            Timestamp::Unix(secs) => write!(f, "{secs}"),
        }
    }
}

/// The `asn` field: the edge's AS number, the IP record's contact list, or
/// full registry data for the origin AS.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AsnValue {
    Number(u32),
    Entities(Vec<ContactEntity>),
    Info(AsnInfo),
}

impl std::fmt::Display for AsnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AsnValue::Number(asn) => write!(f, "{asn}"),
            AsnValue::Info(info) => write!(f, "{}", info.asn),
            AsnValue::Entities(entities) => {
                let json = serde_json::to_string(entities).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Flat result object shared by all formatters. Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "isEUCountry", skip_serializing_if = "Option::is_none")]
    pub is_eu_country: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<AsnValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub botscore: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_for: Option<String>,
}

impl LocationResult {
    /// An otherwise empty result carrying only the timestamp.
    pub fn stamped(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::default()
        }
    }
}
