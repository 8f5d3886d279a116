//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes in registration order
//! - Short-circuit CORS preflight (`OPTIONS`) before any matching
//! - Dispatch to the first matching route or return a terminal not-found
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan, first registered wins
//! - Cross-origin headers are not added here; the server applies them to
//!   every response in one place

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, PathPatternMatcher};
use crate::routing::RoutingError;

/// An async request handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        Box::pin(self(req))
    }
}

/// A registered route: method and path conditions plus the handler to run.
pub struct RouteEntry {
    method: String,
    pattern: String,
    matcher: AndMatcher,
    handler: Arc<dyn Handler>,
}

impl RouteEntry {
    fn new(method: &str, pattern: &str, handler: Arc<dyn Handler>) -> Result<Self, RoutingError> {
        let method = MethodMatcher::new(method);
        let path = PathPatternMatcher::new(pattern)?;
        Ok(Self {
            method: method.method().to_string(),
            pattern: path.as_str().to_string(),
            matcher: AndMatcher::new(vec![Box::new(method), Box::new(path)]),
            handler,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Ordered method + pattern router.
#[derive(Debug, Default)]
pub struct Router {
    entries: Vec<RouteEntry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Registration order is match priority.
    pub fn register<H: Handler>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RoutingError> {
        let entry = RouteEntry::new(method, pattern, Arc::new(handler))?;
        tracing::debug!(method = %entry.method, pattern = %entry.pattern, "Route registered");
        self.entries.push(entry);
        Ok(self)
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RoutingError> {
        self.register("GET", pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RoutingError> {
        self.register("POST", pattern, handler)
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Find the first registered route matching the request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.matcher.matches(req))
    }

    /// Dispatch a request.
    pub async fn route(&self, req: Request<Body>) -> Response {
        let method = req.method().as_str().to_ascii_uppercase();
        if method == Method::OPTIONS.as_str() {
            return preflight_response();
        }

        let handler = {
            let Some(entry) = self.match_request(&req) else {
                tracing::debug!(method = %method, path = %req.uri().path(), "No route matched");
                return not_found_response();
            };
            tracing::debug!(
                method = %method,
                path = %req.uri().path(),
                pattern = %entry.pattern,
                "Route matched"
            );
            Arc::clone(&entry.handler)
        };

        handler.call(req).await
    }
}

/// Empty 200 for CORS preflight.
pub fn preflight_response() -> Response {
    StatusCode::OK.into_response()
}

/// Terminal response when nothing matches.
pub fn not_found_response() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
