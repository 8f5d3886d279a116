//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Register the locator routes in priority order
//! - Create the Axum router that hands every request to the pattern router
//! - Wire up middleware (CORS headers, request ID, tracing, timeout, edge context)
//! - Serve until the shutdown signal fires

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers::{self, Services};
use crate::http::request::{propagate_request_id_layer, request_id_layer, request_span};
use crate::location::edge_context_middleware;
use crate::observability::metrics;
use crate::registry::{RegistryClient, RegistryError};
use crate::routing::{Handler, Router as PatternRouter, RoutingError};
use crate::security::with_cors;

/// Errors raised while building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build registry client: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<PatternRouter>,
}

/// HTTP server for the locator.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let services = Arc::new(Services {
            registry: RegistryClient::new(&config.registry)?,
            speed: config.speed.clone(),
        });
        let routes = Arc::new(build_routes(&services)?);

        let router = Self::build_router(&config, AppState { routes });
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let edge_headers = Arc::new(config.edge.clone());

        let router = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(middleware::from_fn_with_state(edge_headers, edge_context_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(propagate_request_id_layer())
            .layer(request_id_layer());

        with_cors(router)
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Register the locator routes. Order is match priority; the final
/// catch-all makes every other `GET` render the dashboard.
pub fn build_routes(services: &Arc<Services>) -> Result<PatternRouter, RoutingError> {
    let mut routes = PatternRouter::new();
    routes
        .get(".*/ros", handlers::location_text)?
        .get(".*/json", with_services(services, handlers::location_json))?
        .get(".*/speed/down", with_services(services, handlers::speed_down))?
        .post(".*/speed/up", with_services(services, handlers::speed_up))?
        .get(".*", with_services(services, handlers::front_page))?;
    Ok(routes)
}

fn with_services<F, Fut>(services: &Arc<Services>, handler: F) -> impl Handler
where
    F: Fn(Arc<Services>, Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let services = Arc::clone(services);
    move |req: Request<Body>| handler(Arc::clone(&services), req)
}

/// Hand every request to the pattern router.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = state.routes.route(request).await;

    let status = response.status();
    tracing::debug!(method = %method, status = %status, "Request handled");
    metrics::record_request(&method, status.as_u16(), start);
    response
}
