//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and path prefix shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Uri;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUpstreamUrl(String),
    InvalidPathPrefix(String),
    InvalidMetricsAddress(String),
    EmptyDiagnosticFile(&'static str),
    ZeroPayloadLimit,
    ZeroResponseLimit,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(a) => write!(f, "invalid bind address '{}'", a),
            ValidationError::InvalidUpstreamUrl(u) => write!(f, "invalid upstream url '{}'", u),
            ValidationError::InvalidPathPrefix(p) => {
                write!(f, "path prefix '{}' must start and end with '/'", p)
            }
            ValidationError::InvalidMetricsAddress(a) => write!(f, "invalid metrics address '{}'", a),
            ValidationError::EmptyDiagnosticFile(field) => write!(f, "diagnostics.{} is empty", field),
            ValidationError::ZeroPayloadLimit => write!(f, "ocsp.max_payload_bytes must be > 0"),
            ValidationError::ZeroResponseLimit => write!(f, "upstream.max_response_bytes must be > 0"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if !is_http_url(&config.upstream.url) {
        errors.push(ValidationError::InvalidUpstreamUrl(config.upstream.url.clone()));
    }

    if config.upstream.max_response_bytes == 0 {
        errors.push(ValidationError::ZeroResponseLimit);
    }

    let prefix = &config.ocsp.path_prefix;
    if prefix.is_empty() || !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPathPrefix(prefix.clone()));
    }

    if config.ocsp.max_payload_bytes == 0 {
        errors.push(ValidationError::ZeroPayloadLimit);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.diagnostics.enabled {
        if config.diagnostics.request_file.is_empty() {
            errors.push(ValidationError::EmptyDiagnosticFile("request_file"));
        }
        if config.diagnostics.response_file.is_empty() {
            errors.push(ValidationError::EmptyDiagnosticFile("response_file"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(url: &str) -> bool {
    match url.parse::<Uri>() {
        Ok(uri) => uri.scheme_str() == Some("http") && uri.authority().is_some(),
        Err(_) => false,
    }
}
