//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all relay handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Hand each request to the translator and log its outcome

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::diagnostics::FileSink;
use crate::http::request::{request_id_of, UuidRequestId};
use crate::http::response::respond;
use crate::observability::metrics;
use crate::ocsp::{HttpUpstream, RelayError, TranslationOutcome, Translator};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub relay_response: bool,
}

/// HTTP front end of the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server from a validated configuration.
    pub fn new(config: RelayConfig) -> Result<Self, axum::http::uri::InvalidUri> {
        let upstream = Arc::new(HttpUpstream::new(&config.upstream)?);
        let mut translator = Translator::new(config.ocsp.clone(), upstream);

        if config.diagnostics.enabled {
            tracing::info!(
                directory = %config.diagnostics.directory,
                "Diagnostic capture enabled; artifact contents are undefined under concurrent load"
            );
            translator = translator.with_diagnostics(Arc::new(FileSink::new(&config.diagnostics)));
        }

        Ok(Self::with_translator(translator, config.ocsp.relay_response))
    }

    /// Build the server around an existing translator.
    pub fn with_translator(translator: Translator, relay_response: bool) -> Self {
        let state = AppState {
            translator: Arc::new(translator),
            relay_response,
        };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Serve until the shutdown channel fires.
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
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: translate, log, respond.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let result = state.translator.translate(&method, &path).await;

    match &result {
        Ok(TranslationOutcome::Forwarded(forwarded)) => {
            if let Some(e) = &forwarded.decode_error {
                tracing::warn!(
                    request_id = %request_id,
                    path = %path,
                    error = %e,
                    "Undecodable payload, forwarded empty body"
                );
            }
            if forwarded.response.body_truncated {
                tracing::warn!(
                    request_id = %request_id,
                    upstream_status = %forwarded.response.status,
                    "Upstream answer over size limit, body dropped"
                );
            }
            tracing::info!(
                request_id = %request_id,
                bytes = forwarded.request_len,
                upstream_status = %forwarded.response.status,
                upstream_bytes = forwarded.response.body.len(),
                relayed = state.relay_response,
                "OCSP request forwarded"
            );
            metrics::record_request("forwarded", start);
        }
        Ok(TranslationOutcome::Ignored { method }) => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "Method not handled");
            metrics::record_request("ignored", start);
        }
        Err(e) => {
            match e {
                RelayError::Upstream(_) => {
                    tracing::error!(request_id = %request_id, path = %path, error = %e, "Upstream error")
                }
                _ => {
                    tracing::warn!(request_id = %request_id, path = %path, error = %e, "Request rejected")
                }
            }
            metrics::record_request(e.kind(), start);
        }
    }

    respond(result, state.relay_response)
}
