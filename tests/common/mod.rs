//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use edge_locator::config::{RegistryConfig, ServiceConfig};
use edge_locator::HttpServer;

/// Canned registry response for one path.
#[derive(Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Start a mock RDAP registry on an ephemeral port. Requests are answered
/// by exact path; unknown paths get a 404.
pub async fn start_mock_registry(replies: Vec<(&str, MockReply)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let replies: Arc<HashMap<String, MockReply>> = Arc::new(
        replies
            .into_iter()
            .map(|(path, reply)| (path.to_string(), reply))
            .collect(),
    );

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let replies = replies.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let request = String::from_utf8_lossy(&buf[..n]);
                        let path = request
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let reply = replies
                            .get(&path)
                            .cloned()
                            .unwrap_or_else(|| MockReply::status(404));
                        tokio::time::sleep(reply.delay).await;

                        let status_text = match reply.status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            _ => "502 Bad Gateway",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/rdap+json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            reply.body.len(),
                            reply.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Registry config pointing at a mock registry.
pub fn registry_config(addr: SocketAddr) -> RegistryConfig {
    RegistryConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 1,
        ..RegistryConfig::default()
    }
}

/// Server with defaults, using the given registry.
pub fn server(registry: RegistryConfig) -> HttpServer {
    let config = ServiceConfig {
        registry,
        ..ServiceConfig::default()
    };
    HttpServer::new(config).unwrap()
}

/// Drive one request through the full middleware stack.
pub async fn send(server: &HttpServer, request: Request<Body>) -> Response {
    use tower::ServiceExt;
    server.router().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// A vCard entity as RDAP services return it.
pub fn vcard_entity(name: &str) -> serde_json::Value {
    serde_json::json!({
        "objectClassName": "entity",
        "vcardArray": ["vcard", [
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", name],
            ["adr", {"label": "1600 Amphitheatre Pkwy"}, "text", ["", "", "", "", "", "", ""]]
        ]]
    })
}
