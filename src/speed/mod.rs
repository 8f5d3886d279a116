//! Bandwidth measurement endpoints.
//!
//! - download: a zero-filled payload of the requested size
//! - upload: drain the request body and report how much arrived
//!
//! Both are buffered; sizes are bounded by [`SpeedTestConfig`].

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::SpeedTestConfig;

/// Payload size asked for by `?bytes=N`, clamped to the configured maximum.
pub fn requested_bytes(uri: &Uri, config: &SpeedTestConfig) -> usize {
    let requested = uri
        .query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "bytes")
                .and_then(|(_, value)| value.parse::<usize>().ok())
        })
        .unwrap_or(config.default_download_bytes);
    requested.min(config.max_download_bytes)
}

pub fn download(uri: &Uri, config: &SpeedTestConfig) -> Response {
    let size = requested_bytes(uri, config);
    tracing::debug!(bytes = size, "Serving download payload");
    (
        [
            (CONTENT_TYPE, "application/octet-stream"),
            (CACHE_CONTROL, "no-store"),
        ],
        vec![0u8; size],
    )
        .into_response()
}

pub async fn upload(req: Request<Body>, config: &SpeedTestConfig) -> Response {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > config.max_upload_bytes) {
        return StatusCode::PAYLOAD_TOO_LARGE.into_response();
    }

    match axum::body::to_bytes(req.into_body(), config.max_upload_bytes).await {
        Ok(body) => {
            tracing::debug!(bytes = body.len(), "Upload received");
            (
                [(CACHE_CONTROL, "no-store")],
                Json(json!({ "receivedBytes": body.len() })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, limit = config.max_upload_bytes, "Upload rejected");
            StatusCode::PAYLOAD_TOO_LARGE.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SpeedTestConfig {
        SpeedTestConfig {
            default_download_bytes: 16,
            max_download_bytes: 64,
            max_upload_bytes: 8,
        }
    }

    #[test]
    fn test_requested_bytes() {
        let cfg = config();
        assert_eq!(requested_bytes(&"/speed/down".parse().unwrap(), &cfg), 16);
        assert_eq!(requested_bytes(&"/speed/down?bytes=32".parse().unwrap(), &cfg), 32);
        assert_eq!(requested_bytes(&"/speed/down?bytes=1000".parse().unwrap(), &cfg), 64);
        assert_eq!(requested_bytes(&"/speed/down?bytes=lots".parse().unwrap(), &cfg), 16);
        assert_eq!(requested_bytes(&"/speed/down?bytes=0".parse().unwrap(), &cfg), 0);
    }

    #[tokio::test]
    async fn test_download_payload() {
        let response = download(&"/speed/down?bytes=10".parse().unwrap(), &config());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/octet-stream");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), 10);
        assert!(body.iter().all(|b| *b == 0));
    }

    #[tokio::test]
    async fn test_upload_counts_bytes() {
        let req = Request::post("/speed/up").body(Body::from("12345")).unwrap();
        let response = upload(req, &config()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"receivedBytes": 5}));
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let req = Request::post("/speed/up")
            .body(Body::from("0123456789"))
            .unwrap();
        let response = upload(req, &config()).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let req = Request::post("/speed/up")
            .header(CONTENT_LENGTH, "100")
            .body(Body::empty())
            .unwrap();
        let response = upload(req, &config()).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
