//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick human-readable or JSON output from config
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level when set
//! - Each event is written as one unit, so concurrent requests never
//!   split each other's lines

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

pub use tracing_subscriber::util::TryInitError;

/// Default filter directive for a configured level.
pub fn default_directive(level: &str) -> String {
    format!("webhook_ingest={0},webhook_cli={0},tower_http=warn", level)
}

/// Install the global subscriber.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}
