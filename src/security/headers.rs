//! Cross-origin response headers.
//!
//! Every response, including not-found and preflight, allows any origin,
//! method and header. The three headers are set once, by the outermost
//! layer, instead of by each handler.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// The permissive cross-origin headers.
pub const CORS_HEADERS: [HeaderName; 3] = [
    ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
];

fn wildcard() -> HeaderValue {
    HeaderValue::from_static("*")
}

/// Wrap a router so every response carries the cross-origin headers.
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    CORS_HEADERS.into_iter().fold(router, |router, name| {
        router.layer(SetResponseHeaderLayer::overriding(name, wildcard()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_on_every_response() {
        let app = with_cors(Router::new().route("/", get(|| async { "ok" })));

        for uri in ["/", "/missing"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            for name in CORS_HEADERS {
                assert_eq!(response.headers()[&name], "*", "{name} on {uri}");
            }
            if uri == "/missing" {
                assert_eq!(response.status(), StatusCode::NOT_FOUND);
            }
        }
    }
}
