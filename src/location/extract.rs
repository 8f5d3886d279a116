//! Context extraction.
//!
//! Builds a [`LocationResult`] from the edge context and request headers.
//! The two output paths differ on purpose:
//!
//! - JSON/HTML: ISO timestamp, `realIp`/`forwardedFor` set to `"Unknown"`
//!   when their headers are missing, and an `ip` query parameter replaces
//!   the context with a registry lookup.
//! - Text: Unix-seconds timestamp, missing IP headers are omitted, no
//!   query handling.
//!
//! Without an edge context only the timestamp is produced; request headers
//! are read alongside the context, never on their own.

use axum::http::{HeaderMap, Uri};
use chrono::{DateTime, Utc};

use crate::location::context::EdgeContext;
use crate::location::result::{AsnValue, LocationResult, Timestamp, UNKNOWN};
use crate::registry::{IpEnrichment, RegistryClient};

pub const USER_AGENT: &str = "user-agent";
pub const REAL_IP: &str = "x-real-ip";
pub const CONNECTING_IP: &str = "cf-connecting-ip";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// The `ip` query parameter, if present and non-empty.
pub fn query_ip(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "ip")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Copy every present context field into the result.
fn copy_context(context: &EdgeContext, result: &mut LocationResult) {
    result.continent = non_empty(&context.continent);
    result.longitude = context.longitude;
    result.latitude = context.latitude;
    result.country = non_empty(&context.country);
    result.is_eu_country = context.is_eu_country.filter(|eu| *eu);
    result.city = non_empty(&context.city);
    result.postal_code = non_empty(&context.postal_code);
    result.metro_code = non_empty(&context.metro_code);
    result.region = non_empty(&context.region);
    result.region_code = non_empty(&context.region_code);
    result.timezone = non_empty(&context.timezone);
    result.asn = context.asn.filter(|asn| *asn != 0).map(AsnValue::Number);
    result.botscore = context.bot_score;
}

/// Extraction for the text endpoint.
pub fn extract_text(
    context: Option<&EdgeContext>,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> LocationResult {
    let mut result = LocationResult::stamped(Timestamp::unix(now));
    let Some(context) = context else {
        return result;
    };

    copy_context(context, &mut result);
    result.user_agent = header(headers, USER_AGENT).map(str::to_string);
    result.real_ip = header(headers, REAL_IP).map(str::to_string);
    result.ip = header(headers, CONNECTING_IP).map(str::to_string);
    result
}

/// Extraction for the JSON and HTML endpoints, without a query override.
pub fn extract_json(
    context: Option<&EdgeContext>,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> LocationResult {
    let mut result = LocationResult::stamped(Timestamp::iso(now));
    let Some(context) = context else {
        return result;
    };

    copy_context(context, &mut result);
    result.user_agent = header(headers, USER_AGENT).map(str::to_string);

    let real_ip = header(headers, REAL_IP);
    let connecting_ip = header(headers, CONNECTING_IP);
    result.ip = connecting_ip.or(real_ip).map(str::to_string);
    result.real_ip = Some(real_ip.unwrap_or(UNKNOWN).to_string());
    result.forwarded_for = Some(connecting_ip.unwrap_or(UNKNOWN).to_string());
    result
}

/// Merge registry data for an explicitly requested IP.
pub fn apply_enrichment(result: &mut LocationResult, ip: &str, enrichment: IpEnrichment) {
    result.real_ip = Some(ip.to_string());
    result.ip = Some(ip.to_string());
    result.country = Some(enrichment.record.country);
    result.asn = Some(match enrichment.asn {
        Some(info) => AsnValue::Info(info),
        None => AsnValue::Entities(enrichment.record.entities),
    });
}

/// Extraction for the JSON and HTML endpoints.
///
/// When `query_ip` is set the edge context is ignored and the registry is
/// asked about that address instead.
pub async fn extract_json_with_lookup(
    context: Option<&EdgeContext>,
    headers: &HeaderMap,
    query_ip: Option<&str>,
    registry: &RegistryClient,
    now: DateTime<Utc>,
) -> LocationResult {
    match query_ip {
        Some(ip) => {
            let mut result = LocationResult::stamped(Timestamp::iso(now));
            let enrichment = registry.enrich_ip(ip).await;
            apply_enrichment(&mut result, ip, enrichment);
            result
        }
        None => extract_json(context, headers, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AsnInfo, IpRecord};
    use axum::http::HeaderValue;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    fn seattle() -> EdgeContext {
        EdgeContext {
            country: Some("US".into()),
            city: Some("Seattle".into()),
            latitude: Some(47.6),
            longitude: Some(-122.3),
            asn: Some(13335),
            bot_score: Some(42),
            ..EdgeContext::default()
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_query_ip() {
        let uri: Uri = "/json?ip=8.8.8.8&x=1".parse().unwrap();
        assert_eq!(query_ip(&uri).as_deref(), Some("8.8.8.8"));

        let uri: Uri = "/json?ip=2001%3Adb8%3A%3A1".parse().unwrap();
        assert_eq!(query_ip(&uri).as_deref(), Some("2001:db8::1"));

        assert_eq!(query_ip(&"/json?ip=".parse().unwrap()), None);
        assert_eq!(query_ip(&"/json".parse().unwrap()), None);
    }

    #[test]
    fn test_json_with_context() {
        let map = headers(&[("cf-connecting-ip", "1.2.3.4"), ("user-agent", "curl/8.0")]);
        let result = extract_json(Some(&seattle()), &map, now());

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "timestamp": "2025-01-02T03:04:05.000Z",
                "country": "US",
                "city": "Seattle",
                "latitude": 47.6,
                "longitude": -122.3,
                "asn": 13335,
                "botscore": 42,
                "userAgent": "curl/8.0",
                "ip": "1.2.3.4",
                "realIp": "Unknown",
                "forwardedFor": "1.2.3.4"
            })
        );
    }

    #[test]
    fn test_json_ip_falls_back_to_real_ip() {
        let map = headers(&[("x-real-ip", "10.0.0.1")]);
        let result = extract_json(Some(&EdgeContext::default()), &map, now());

        assert_eq!(result.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(result.real_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(result.forwarded_for.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_text_omits_missing_ips() {
        let result = extract_text(Some(&seattle()), &HeaderMap::new(), now());

        assert_eq!(result.timestamp, Some(Timestamp::Unix(1_735_787_045)));
        assert_eq!(result.country.as_deref(), Some("US"));
        assert_eq!(result.real_ip, None);
        assert_eq!(result.ip, None);
        assert_eq!(result.forwarded_for, None);
    }

    #[test]
    fn test_no_context_yields_timestamp_only() {
        let map = headers(&[("cf-connecting-ip", "1.2.3.4"), ("user-agent", "curl/8.0")]);

        let text = extract_text(None, &map, now());
        assert_eq!(text, LocationResult::stamped(Timestamp::unix(now())));

        let json = extract_json(None, &map, now());
        assert_eq!(json, LocationResult::stamped(Timestamp::iso(now())));
    }

    #[test]
    fn test_falsy_context_values_are_omitted() {
        let context = EdgeContext {
            city: Some(String::new()),
            is_eu_country: Some(false),
            asn: Some(0),
            ..EdgeContext::default()
        };
        let result = extract_text(Some(&context), &HeaderMap::new(), now());

        assert_eq!(result.city, None);
        assert_eq!(result.is_eu_country, None);
        assert_eq!(result.asn, None);
    }

    #[test]
    fn test_enrichment_with_origin_asn() {
        let mut result = LocationResult::stamped(Timestamp::iso(now()));
        let enrichment = IpEnrichment {
            record: IpRecord {
                country: "US".into(),
                entities: Vec::new(),
                origin_asn: Some(15169),
            },
            asn: Some(AsnInfo::placeholder(15169)),
        };
        apply_enrichment(&mut result, "8.8.8.8", enrichment);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "timestamp": "2025-01-02T03:04:05.000Z",
                "realIp": "8.8.8.8",
                "ip": "8.8.8.8",
                "country": "US",
                "asn": {"asn": 15169, "entities": []}
            })
        );
    }

    #[test]
    fn test_enrichment_placeholder() {
        let mut result = LocationResult::default();
        apply_enrichment(
            &mut result,
            "192.0.2.1",
            IpEnrichment {
                record: IpRecord::placeholder(),
                asn: None,
            },
        );

        assert_eq!(result.country.as_deref(), Some("Unknown"));
        assert_eq!(result.asn, Some(AsnValue::Entities(Vec::new())));
    }
}
