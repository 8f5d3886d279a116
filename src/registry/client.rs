//! RDAP registry client with timeout and error absorption.
//!
//! # Responsibilities
//! - Query `/autnum/{asn}` and `/ip/{address}` on the configured RDAP service
//! - Normalize the returned entities into contact cards
//! - Absorb every failure into a placeholder result at the lookup boundary
//!
//! # Design Decisions
//! - `try_lookup_*` return typed errors; `lookup_*` never fail
//! - Each lookup is bounded by the configured timeout
//! - No retries and no caching

use std::net::IpAddr;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::RegistryConfig;
use crate::observability::metrics;
use crate::registry::entity::normalize_entities;
use crate::registry::types::{
    AsnInfo, ContactEntity, IpRecord, RegistryError, RegistryResult, UNKNOWN_COUNTRY,
};

const RDAP_ACCEPT: &str = "application/rdap+json, application/json";

/// ARIN extension listing the origin autonomous systems of a network.
const ORIGIN_AUTNUMS: &str = "arin_originas0_originautnums";

/// Result of the chained IP → ASN enrichment.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IpEnrichment {
    pub record: IpRecord,
    /// Registry data for the record's origin ASN, when it names one.
    pub asn: Option<AsnInfo>,
}

/// RDAP client. Cheap to clone.
#[derive(Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl RegistryClient {
    /// Create a new registry client.
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, path: &str) -> RegistryResult<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let request = async {
            let response = self.http.get(&url).header(ACCEPT, RDAP_ACCEPT).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(RegistryError::Status(status));
            }
            let body = response.bytes().await?;
            Ok::<Value, RegistryError>(serde_json::from_slice(&body)?)
        };

        match timeout(Duration::from_secs(self.timeout_secs), request).await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::Timeout(self.timeout_secs)),
        }
    }

    /// Look up an autonomous system.
    pub async fn try_lookup_by_asn(&self, asn: u32) -> RegistryResult<AsnInfo> {
        let body = self.fetch(&format!("autnum/{asn}")).await?;
        Ok(AsnInfo {
            asn,
            entities: entities_of(&body),
        })
    }

    /// Look up an IP address.
    pub async fn try_lookup_by_ip(&self, address: &str) -> RegistryResult<IpRecord> {
        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| RegistryError::InvalidAddress(address.to_string()))?;

        let body = self.fetch(&format!("ip/{ip}")).await?;
        let country = body
            .get("country")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY)
            .to_string();
        let origin_asn = body
            .get(ORIGIN_AUTNUMS)
            .and_then(Value::as_array)
            .and_then(|asns| asns.first())
            .and_then(Value::as_u64)
            .and_then(|asn| u32::try_from(asn).ok());

        Ok(IpRecord {
            country,
            entities: entities_of(&body),
            origin_asn,
        })
    }

    /// Look up an autonomous system, falling back to an empty entity list.
    pub async fn lookup_by_asn(&self, asn: u32) -> AsnInfo {
        match self.try_lookup_by_asn(asn).await {
            Ok(info) => {
                metrics::record_lookup("asn", true);
                info
            }
            Err(e) => {
                tracing::warn!(asn, error = %e, "ASN lookup failed, using placeholder");
                metrics::record_lookup("asn", false);
                AsnInfo::placeholder(asn)
            }
        }
    }

    /// Look up an IP address, falling back to an "Unknown" country.
    pub async fn lookup_by_ip(&self, address: &str) -> IpRecord {
        match self.try_lookup_by_ip(address).await {
            Ok(record) => {
                metrics::record_lookup("ip", true);
                record
            }
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "IP lookup failed, using placeholder");
                metrics::record_lookup("ip", false);
                IpRecord::placeholder()
            }
        }
    }

    /// IP lookup followed by a lookup of the record's origin ASN.
    /// Each step falls back independently.
    pub async fn enrich_ip(&self, address: &str) -> IpEnrichment {
        let record = self.lookup_by_ip(address).await;
        let asn = match record.origin_asn {
            Some(asn) => Some(self.lookup_by_asn(asn).await),
            None => None,
        };
        IpEnrichment { record, asn }
    }
}

fn entities_of(body: &Value) -> Vec<ContactEntity> {
    body.get("entities")
        .and_then(Value::as_array)
        .map(|entities| normalize_entities(entities))
        .unwrap_or_default()
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unreachable_client() -> RegistryClient {
        RegistryClient::new(&RegistryConfig {
            // Nothing listens on port 1.
            base_url: "http://127.0.0.1:1/".to_string(),
            timeout_secs: 2,
            ..RegistryConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trimmed() {
        assert_eq!(unreachable_client().base_url(), "http://127.0.0.1:1");
    }

    #[test]
    fn test_entities_of_missing_field() {
        assert!(entities_of(&json!({"handle": "AS15169"})).is_empty());
        assert!(entities_of(&json!({"entities": "nope"})).is_empty());
        assert_eq!(
            entities_of(&json!({"entities": [{"handle": "X"}]})),
            vec![ContactEntity::Invalid]
        );
    }

    #[tokio::test]
    async fn test_asn_lookup_absorbs_network_failure() {
        let client = unreachable_client();

        assert!(client.try_lookup_by_asn(15169).await.is_err());
        assert_eq!(client.lookup_by_asn(15169).await, AsnInfo::placeholder(15169));
    }

    #[tokio::test]
    async fn test_ip_lookup_absorbs_network_failure() {
        let client = unreachable_client();

        let record = client.lookup_by_ip("8.8.8.8").await;
        assert_eq!(record, IpRecord::placeholder());
        assert_eq!(record.country, "Unknown");
    }

    #[tokio::test]
    async fn test_invalid_address_rejected_before_request() {
        let client = unreachable_client();

        let err = client.try_lookup_by_ip("../../autnum/1").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddress(_)));

        let enrichment = client.enrich_ip("not-an-ip").await;
        assert_eq!(enrichment.record, IpRecord::placeholder());
        assert_eq!(enrichment.asn, None);
    }
}
