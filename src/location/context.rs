//! Edge platform request context.
//!
//! The edge resolves geolocation, ASN and bot score before the request
//! reaches us. An embedding host can insert an [`EdgeContext`] extension
//! directly; otherwise [`edge_context_middleware`] builds one from the
//! trusted headers named in [`EdgeHeaderConfig`].

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::config::EdgeHeaderConfig;

/// Pre-resolved request metadata from the edge platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeContext {
    pub continent: Option<String>,
    pub country: Option<String>,
    pub is_eu_country: Option<bool>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub metro_code: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub timezone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub asn: Option<u32>,
    pub bot_score: Option<u8>,
}

impl EdgeContext {
    /// Build a context from trusted edge headers.
    /// Returns `None` when none of the headers carry a usable value.
    pub fn from_headers(headers: &HeaderMap, names: &EdgeHeaderConfig) -> Option<Self> {
        let text = |name: &str| header_value(headers, name).map(str::to_string);

        let context = Self {
            continent: text(&names.continent),
            country: text(&names.country),
            is_eu_country: header_value(headers, &names.is_eu_country).and_then(parse_flag),
            city: text(&names.city),
            postal_code: text(&names.postal_code),
            metro_code: text(&names.metro_code),
            region: text(&names.region),
            region_code: text(&names.region_code),
            timezone: text(&names.timezone),
            latitude: parsed(headers, &names.latitude),
            longitude: parsed(headers, &names.longitude),
            asn: parsed(headers, &names.asn),
            bot_score: parsed(headers, &names.bot_score),
        };

        if context == Self::default() {
            None
        } else {
            Some(context)
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parsed<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    let raw = header_value(headers, name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(header = %name, value = %raw, "Ignoring unparsable edge header");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Attach an [`EdgeContext`] parsed from trusted headers.
/// An extension inserted by the host is left untouched.
pub async fn edge_context_middleware(
    State(names): State<Arc<EdgeHeaderConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if names.trust_headers && req.extensions().get::<EdgeContext>().is_none() {
        if let Some(context) = EdgeContext::from_headers(req.headers(), &names) {
            req.extensions_mut().insert(context);
        }
    }
    next.run(req).await
}
