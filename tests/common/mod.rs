//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use ocsp_relay::config::RelayConfig;
use ocsp_relay::{HttpServer, Shutdown};

/// Canned OCSPResponse: responseStatus = successful, no responseBytes.
pub const OCSP_RESPONSE: &[u8] = &[0x30, 0x03, 0x0a, 0x01, 0x00];

/// One POST seen by the mock responder.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Mock CA responder that records every POST it receives.
#[derive(Clone, Default)]
pub struct MockResponder {
    posts: Arc<Mutex<Vec<RecordedPost>>>,
}

impl MockResponder {
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

/// Start the mock responder on an ephemeral port.
pub async fn start_mock_responder() -> (SocketAddr, MockResponder) {
    start_mock_responder_with(Bytes::from_static(OCSP_RESPONSE)).await
}

/// Start a mock responder answering every POST with `answer`.
pub async fn start_mock_responder_with(answer: Bytes) -> (SocketAddr, MockResponder) {
    let responder = MockResponder::default();
    let posts = responder.posts.clone();

    let app = Router::new().route(
        "/",
        post(move |headers: HeaderMap, body: Bytes| {
            let posts = posts.clone();
            let answer = answer.clone();
            async move {
                posts.lock().unwrap().push(RecordedPost {
                    content_type: headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body,
                });
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/ocsp-response")],
                    answer,
                )
                    .into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, responder)
}

/// Config pointing at `upstream`, everything else default.
pub fn relay_config(upstream: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = format!("http://{}", upstream);
    config
}

/// A running relay and the handle to stop it.
pub struct RunningRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> RunningRelay {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningRelay { addr, shutdown }
}

/// Client that never pools, so each request is its own connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
