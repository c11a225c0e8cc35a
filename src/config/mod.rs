//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (port, upstream)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the translator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, validated, ConfigError};
pub use schema::{
    DecodeFailurePolicy, DiagnosticsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    OcspConfig, RelayConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
