//! Per-request error taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Why a GET could not be translated into an upstream POST.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("path too small: {len} bytes, prefix needs {prefix_len}")]
    PathTooShort { len: usize, prefix_len: usize },

    #[error("path does not start with '{prefix}'")]
    PrefixMismatch { prefix: String },

    #[error("invalid OCSP payload: {0}")]
    Decode(#[from] DecodeError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::PathTooShort { .. } => "path_too_short",
            RelayError::PrefixMismatch { .. } => "prefix_mismatch",
            RelayError::Decode(_) => "decode_error",
            RelayError::Upstream(_) => "upstream_error",
        }
    }
}

/// The encoded path payload could not be turned into request bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload of {len} bytes exceeds limit of {limit}")]
    TooLarge { len: usize, limit: usize },

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

/// Failure talking to the upstream responder.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("no answer within {0:?}")]
    Timeout(Duration),
}
