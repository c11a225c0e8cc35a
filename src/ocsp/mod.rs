//! OCSP GET decoder and POST forwarder.
//!
//! # Data Flow
//! ```text
//! GET /ocsp/<url-encoded base64 DER>
//!     → payload.rs (prefix check, percent + base64 decode)
//!     → translator.rs (policy, diagnostics, outcome)
//!     → upstream.rs (POST application/ocsp-request)
//! ```
//!
//! # Design Decisions
//! - The request body is opaque: no ASN.1 parsing or validation
//! - Errors are returned to the caller, never printed here
//! - Only GET is translated; every other method is a no-op

pub mod error;
pub mod payload;
pub mod translator;
pub mod upstream;

pub use error::{DecodeError, RelayError, UpstreamError};
pub use translator::{Forwarded, TranslationOutcome, Translator};
pub use upstream::{
    HttpUpstream, Upstream, UpstreamResponse, OCSP_REQUEST_CONTENT_TYPE,
    OCSP_RESPONSE_CONTENT_TYPE,
};
