//! Diagnostic capture of translated requests.
//!
//! # Data Flow
//! ```text
//! translator
//!     → record_request (decoded bytes, before the upstream POST)
//!     → record_exchange (after the upstream POST, success or not)
//!     → sink implementation (noop, files, test recorder)
//! ```
//!
//! # Design Decisions
//! - Sinks are infallible to the caller; they swallow their own failures
//! - Capture never blocks forwarding on error

pub mod file;

use async_trait::async_trait;

use crate::ocsp::UpstreamResponse;

pub use file::FileSink;

/// Observer of each translation's intermediate artifacts.
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    /// Called with the bytes about to be POSTed upstream.
    async fn record_request(&self, decoded: &[u8]);

    /// Called once the upstream exchange finished. `response` is `None` when
    /// the POST failed.
    async fn record_exchange(&self, decoded: &[u8], response: Option<&UpstreamResponse>);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl DiagnosticSink for NoopSink {
    async fn record_request(&self, _decoded: &[u8]) {}

    async fn record_exchange(&self, _decoded: &[u8], _response: Option<&UpstreamResponse>) {}
}
