//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the OCSP relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream OCSP responder.
    pub upstream: UpstreamConfig,

    /// GET-to-POST translation settings.
    pub ocsp: OcspConfig,

    /// Diagnostic capture of decoded requests.
    pub diagnostics: DiagnosticsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Replace the port of the bind address, keeping the host part.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Responder URL receiving the binary POST.
    pub url: String,

    /// Total timeout for the upstream exchange in seconds (0 = none).
    pub timeout_secs: u64,

    /// Largest responder answer kept in memory. Longer answers still count
    /// as forwarded but their body is dropped.
    pub max_response_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://certificate.authority:81".to_string(),
            timeout_secs: 0,
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// What to do when the path payload is not valid base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeFailurePolicy {
    /// Drop the request without contacting the upstream.
    #[default]
    Abort,
    /// Forward an empty body to the upstream.
    ForwardEmpty,
}

/// GET-to-POST translation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OcspConfig {
    /// Leading path segment stripped before decoding.
    pub path_prefix: String,

    /// Behaviour on undecodable payloads.
    pub decode_failure: DecodeFailurePolicy,

    /// Return the upstream status and body to the caller.
    pub relay_response: bool,

    /// Longest accepted encoded payload in bytes.
    pub max_payload_bytes: usize,
}

impl Default for OcspConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/ocsp/".to_string(),
            decode_failure: DecodeFailurePolicy::Abort,
            relay_response: false,
            max_payload_bytes: 64 * 1024,
        }
    }
}

/// Diagnostic capture configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Write artifacts to disk.
    pub enabled: bool,

    /// Directory holding the artifact files.
    pub directory: String,

    /// File receiving the decoded request bytes.
    pub request_file: String,

    /// File written after each upstream exchange.
    pub response_file: String,

    /// Write the upstream response body to `response_file` instead of the
    /// decoded request.
    pub capture_upstream_response: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: ".".to_string(),
            request_file: "decoded_nginx_request.txt".to_string(),
            response_file: "response_from_ocsp_server.txt".to_string(),
            capture_upstream_response: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
