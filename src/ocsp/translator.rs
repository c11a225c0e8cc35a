//! GET-to-POST translation.
//!
//! # Flow
//! ```text
//! (method, path)
//!     → non-GET: Ignored
//!     → strip prefix (too short / mismatch → error)
//!     → decode payload (policy decides on failure)
//!     → diagnostics.record_request
//!     → upstream POST
//!     → diagnostics.record_exchange
//!     → Forwarded
//! ```
//!
//! The translator owns no mutable state; concurrent requests only share the
//! immutable config and the upstream client.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;

use crate::config::{DecodeFailurePolicy, OcspConfig};
use crate::diagnostics::{DiagnosticSink, NoopSink};
use crate::ocsp::error::{DecodeError, RelayError};
use crate::ocsp::payload::{decode_payload, strip_prefix};
use crate::ocsp::upstream::{Upstream, UpstreamResponse};

/// Successful result of [`Translator::translate`].
#[derive(Debug)]
pub enum TranslationOutcome {
    /// The upstream was called and answered.
    Forwarded(Forwarded),
    /// The method carries no translation; nothing was sent upstream.
    Ignored { method: Method },
}

#[derive(Debug)]
pub struct Forwarded {
    /// Number of bytes POSTed upstream.
    pub request_len: usize,
    pub response: UpstreamResponse,
    /// Set when an undecodable payload was replaced with an empty body.
    pub decode_error: Option<DecodeError>,
}

pub struct Translator {
    config: OcspConfig,
    upstream: Arc<dyn Upstream>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Translator {
    pub fn new(config: OcspConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            config,
            upstream,
            diagnostics: Arc::new(NoopSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &OcspConfig {
        &self.config
    }

    /// Translate one inbound request into at most one upstream POST.
    pub async fn translate(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<TranslationOutcome, RelayError> {
        if *method != Method::GET {
            return Ok(TranslationOutcome::Ignored {
                method: method.clone(),
            });
        }

        let encoded = strip_prefix(path, &self.config.path_prefix)?;

        let (decoded, decode_error) = match decode_payload(encoded, self.config.max_payload_bytes) {
            Ok(bytes) => (bytes, None),
            Err(e) => match self.config.decode_failure {
                DecodeFailurePolicy::Abort => return Err(e.into()),
                DecodeFailurePolicy::ForwardEmpty => (Vec::new(), Some(e)),
            },
        };

        self.diagnostics.record_request(&decoded).await;

        let body = Bytes::from(decoded);
        let result = self.upstream.post(body.clone()).await;
        self.diagnostics
            .record_exchange(&body, result.as_ref().ok())
            .await;

        Ok(TranslationOutcome::Forwarded(Forwarded {
            request_len: body.len(),
            response: result?,
            decode_error,
        }))
    }
}
