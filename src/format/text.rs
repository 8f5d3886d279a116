//! RouterOS script text format.
//!
//! `do {:return {"key"="value";...}}` so a RouterOS script can `:parse` the
//! body and read fields from the returned array. The prefix is always
//! `do {:return {` with a space.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::location::LocationResult;

pub const PREFIX: &str = "do {:return {";
pub const SUFFIX: &str = "}}";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Present fields in output order.
pub fn fields(result: &LocationResult) -> Vec<(&'static str, String)> {
    fn push<T: ToString>(out: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            out.push((key, value.to_string()));
        }
    }

    let mut out = Vec::new();
    push(&mut out, "timestamp", &result.timestamp);
    push(&mut out, "continent", &result.continent);
    push(&mut out, "longitude", &result.longitude);
    push(&mut out, "latitude", &result.latitude);
    push(&mut out, "country", &result.country);
    push(&mut out, "isEUCountry", &result.is_eu_country);
    push(&mut out, "city", &result.city);
    push(&mut out, "postalCode", &result.postal_code);
    push(&mut out, "metroCode", &result.metro_code);
    push(&mut out, "region", &result.region);
    push(&mut out, "regionCode", &result.region_code);
    push(&mut out, "timezone", &result.timezone);
    push(&mut out, "botscore", &result.botscore);
    push(&mut out, "asn", &result.asn);
    push(&mut out, "userAgent", &result.user_agent);
    push(&mut out, "realIp", &result.real_ip);
    push(&mut out, "ip", &result.ip);
    push(&mut out, "forwardedFor", &result.forwarded_for);
    out
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Render a result in the text grammar.
pub fn render(result: &LocationResult) -> String {
    let body = fields(result)
        .iter()
        .map(|(key, value)| format!("\"{key}\"=\"{}\"", escape(value)))
        .collect::<Vec<_>>()
        .join(";");
    format!("{PREFIX}{body}{SUFFIX}")
}

pub fn response(result: &LocationResult) -> Response {
    ([(CONTENT_TYPE, CONTENT_TYPE_TEXT)], render(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{AsnValue, Timestamp};

    #[test]
    fn test_timestamp_only() {
        let result = LocationResult::stamped(Timestamp::Unix(1_700_000_000));
        assert_eq!(render(&result), r#"do {:return {"timestamp"="1700000000"}}"#);
    }

    #[test]
    fn test_field_order_and_values() {
        let result = LocationResult {
            timestamp: Some(Timestamp::Unix(1)),
            country: Some("US".into()),
            latitude: Some(47.6),
            longitude: Some(-122.3),
            asn: Some(AsnValue::Number(13335)),
            botscore: Some(7),
            is_eu_country: Some(true),
            ip: Some("1.2.3.4".into()),
            ..LocationResult::default()
        };

        assert_eq!(
            render(&result),
            concat!(
                r#"do {:return {"timestamp"="1";"longitude"="-122.3";"latitude"="47.6";"#,
                r#""country"="US";"isEUCountry"="true";"botscore"="7";"asn"="13335";"#,
                r#""ip"="1.2.3.4"}}"#
            )
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let result = LocationResult {
            user_agent: Some(r#"Mozilla "test" \ agent"#.into()),
            ..LocationResult::default()
        };

        assert_eq!(
            render(&result),
            r#"do {:return {"userAgent"="Mozilla \"test\" \\ agent"}}"#
        );

        let result = LocationResult {
            user_agent: Some("curl $[/system reboot] $user".into()),
            ..LocationResult::default()
        };

        assert_eq!(
            render(&result),
            r#"do {:return {"userAgent"="curl \$[/system reboot] \$user"}}"#
        );
    }

    #[test]
    fn test_content_type() {
        let response = response(&LocationResult::default());
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }
}
