//! Route handlers.
//!
//! Each handler takes the raw request, reads what it needs from the request
//! parts, and formats a [`LocationResult`](crate::location::LocationResult).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{request::Parts, Request};
use axum::response::Response;
use chrono::Utc;

use crate::config::SpeedTestConfig;
use crate::format::{html, json, text};
use crate::location::extract::{extract_json_with_lookup, extract_text, query_ip};
use crate::location::{EdgeContext, LocationResult};
use crate::registry::RegistryClient;
use crate::speed;

/// Shared dependencies of the handlers.
#[derive(Debug, Clone)]
pub struct Services {
    pub registry: RegistryClient,
    pub speed: SpeedTestConfig,
}

fn edge_context(parts: &Parts) -> Option<&EdgeContext> {
    parts.extensions.get::<EdgeContext>()
}

async fn locate(services: &Services, parts: &Parts) -> LocationResult {
    let ip = query_ip(&parts.uri);
    extract_json_with_lookup(
        edge_context(parts),
        &parts.headers,
        ip.as_deref(),
        &services.registry,
        Utc::now(),
    )
    .await
}

/// `GET .*/ros`
pub async fn location_text(req: Request<Body>) -> Response {
    let (parts, _) = req.into_parts();
    let result = extract_text(edge_context(&parts), &parts.headers, Utc::now());
    text::response(&result)
}

/// `GET .*/json`
pub async fn location_json(services: Arc<Services>, req: Request<Body>) -> Response {
    let (parts, _) = req.into_parts();
    let result = locate(&services, &parts).await;
    json::response(&result)
}

/// `GET` anything else.
pub async fn front_page(services: Arc<Services>, req: Request<Body>) -> Response {
    let (parts, _) = req.into_parts();
    let result = locate(&services, &parts).await;
    html::response(&result)
}

/// `GET .*/speed/down`
pub async fn speed_down(services: Arc<Services>, req: Request<Body>) -> Response {
    speed::download(req.uri(), &services.speed)
}

/// `POST .*/speed/up`
pub async fn speed_up(services: Arc<Services>, req: Request<Body>) -> Response {
    speed::upload(req, &services.speed).await
}
