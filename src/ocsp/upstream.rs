//! Upstream responder client.
//!
//! # Responsibilities
//! - POST raw OCSP request bytes with `application/ocsp-request`
//! - Read the full responder answer
//! - Apply the optional exchange timeout
//!
//! No retries: a failed exchange is reported once and the request is lost.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, uri::InvalidUri, HeaderValue, Method, Request, StatusCode, Uri};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::ocsp::error::UpstreamError;

pub const OCSP_REQUEST_CONTENT_TYPE: &str = "application/ocsp-request";
pub const OCSP_RESPONSE_CONTENT_TYPE: &str = "application/ocsp-response";

/// What the responder sent back.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    /// Empty when `body_truncated` is set.
    pub body: Bytes,
    /// The answer exceeded `upstream.max_response_bytes` and was dropped.
    pub body_truncated: bool,
}

/// A responder accepting binary OCSP POSTs.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn post(&self, body: Bytes) -> Result<UpstreamResponse, UpstreamError>;
}

/// Upstream reached over plain HTTP with a pooled hyper client.
pub struct HttpUpstream {
    client: Client<HttpConnector, Body>,
    uri: Uri,
    timeout: Option<Duration>,
    max_response_bytes: usize,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InvalidUri> {
        let uri = config.url.parse::<Uri>()?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));

        Ok(Self {
            client,
            uri,
            timeout,
            max_response_bytes: config.max_response_bytes,
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    async fn exchange(&self, body: Bytes) -> Result<UpstreamResponse, UpstreamError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::CONTENT_TYPE, OCSP_REQUEST_CONTENT_TYPE)
            .body(Body::from(body))?;

        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();

        // An oversized answer is still an answer: keep the status.
        let limited = Limited::new(body, self.max_response_bytes);
        let (body, body_truncated) = match limited.collect().await {
            Ok(collected) => (collected.to_bytes(), false),
            Err(e) if e.is::<LengthLimitError>() => (Bytes::new(), true),
            Err(e) => return Err(UpstreamError::Body(e)),
        };

        Ok(UpstreamResponse {
            status: parts.status,
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            body,
            body_truncated,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn post(&self, body: Bytes) -> Result<UpstreamResponse, UpstreamError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(body))
                .await
                .map_err(|_| UpstreamError::Timeout(limit))?,
            None => self.exchange(body).await,
        }
    }
}
