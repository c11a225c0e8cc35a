//! OCSP GET-to-POST relay library.

pub mod config;
pub mod diagnostics;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod ocsp;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use ocsp::{RelayError, TranslationOutcome, Translator};
