//! Registry record types and error definitions.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Label used for an `adr` property that carries no label parameter.
pub const UNKNOWN_ADDRESS: &str = "Unknown address";

/// Country reported when the IP lookup fails.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A normalized contact card from a registry record.
///
/// Serializes as `{"type":"vcard", ...fields}` or exactly
/// `{"type":"invalid","details":null}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactEntity {
    Vcard(Map<String, Value>),
    Invalid,
}

impl ContactEntity {
    pub fn is_valid(&self) -> bool {
        matches!(self, ContactEntity::Vcard(_))
    }

    /// Look up a vCard property, e.g. `fn` for the formatted name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            ContactEntity::Vcard(fields) => fields.get(key),
            ContactEntity::Invalid => None,
        }
    }
}

impl Serialize for ContactEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContactEntity::Vcard(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("type", "vcard")?;
                for (key, value) in fields {
                    if key != "type" {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            ContactEntity::Invalid => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "invalid")?;
                map.serialize_entry("details", &Value::Null)?;
                map.end()
            }
        }
    }
}

/// Registry data for an autonomous system.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AsnInfo {
    pub asn: u32,
    pub entities: Vec<ContactEntity>,
}

impl AsnInfo {
    /// Result used when the lookup fails.
    pub fn placeholder(asn: u32) -> Self {
        Self {
            asn,
            entities: Vec::new(),
        }
    }
}

/// Registry data for an IP address.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRecord {
    /// Country code of the allocation.
    pub country: String,
    pub entities: Vec<ContactEntity>,
    /// First origin autonomous system advertised for the network, if the
    /// registry publishes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_asn: Option<u32>,
}

impl IpRecord {
    /// Result used when the lookup fails.
    pub fn placeholder() -> Self {
        Self {
            country: UNKNOWN_COUNTRY.to_string(),
            entities: Vec::new(),
            origin_asn: None,
        }
    }
}

/// Errors that can occur during a registry lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Request failed to send or the body could not be read.
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry answered with a non-success status.
    #[error("registry returned status {0}")]
    Status(reqwest::StatusCode),

    /// Body was not JSON.
    #[error("registry returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Lookup exceeded the configured timeout.
    #[error("registry lookup timed out after {0} seconds")]
    Timeout(u64),

    /// The address could not be parsed as an IP.
    #[error("invalid IP address '{0}'")]
    InvalidAddress(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
