//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Bind the listener
//! - Print the endpoint banner once traffic can be accepted
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Overrides are validated together with the file contents

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, ListenerConfig, ServiceConfig};
use crate::handlers::info::{SIPGATE_PATH, WHATSAPP_PATH};
use crate::observability::logging::TryInitError;

/// Fatal errors before the server starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Settings given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut ServiceConfig) {
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

/// Load the config file (or defaults) and apply overrides.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<ServiceConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bind the configured listener address.
pub async fn bind(listener: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = listener.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Log where the service can be reached.
pub fn log_banner(config: &ServiceConfig, local_addr: SocketAddr) {
    let port = local_addr.port();
    tracing::info!(
        address = %local_addr,
        downstream = %config.downstream.actor,
        max_body_bytes = config.limits.max_body_bytes,
        "🚀 Webhook Test Server läuft auf Port {}",
        port
    );
    tracing::info!("🏠 Local: http://localhost:{}", port);
    tracing::info!("🔗 Starte ngrok mit: ngrok http {}", port);
    tracing::info!("📞 SipGate Webhook: POST http://localhost:{}{}", port, SIPGATE_PATH);
    tracing::info!("💬 WhatsApp Webhook: POST http://localhost:{}{}", port, WHATSAPP_PATH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, Overrides::default()).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            host: Some("127.0.0.1".into()),
            port: Some(9000),
            log_level: Some("debug".into()),
        };
        let config = resolve_config(None, overrides).unwrap();
        assert_eq!(config.listener.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = Overrides {
            port: Some(0),
            ..Overrides::default()
        };
        let err = resolve_config(None, overrides).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn test_bind_error_names_address() {
        let listener = ListenerConfig {
            host: "not a host".into(),
            port: 3000,
        };
        let err = bind(&listener).await.unwrap_err();
        assert!(err.to_string().starts_with("failed to bind not a host:3000"));
    }
}
