//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI / environment overrides (port, host, log level)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the dispatcher at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AliasConfig, DownstreamConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    ServiceConfig, SipgateAliases, WhatsappAliases, DEFAULT_PORT,
};
pub use validation::{validate_config, ValidationError};
