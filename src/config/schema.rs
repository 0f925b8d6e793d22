//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Port used when neither the config file, the CLI nor the environment set one.
pub const DEFAULT_PORT: u16 = 3000;

/// Root configuration for the webhook ingestion service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Field alias tables per webhook source.
    pub aliases: AliasConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request limits enforced by the transport layer.
    pub limits: LimitsConfig,

    /// Simulated downstream automation consumer.
    pub downstream: DownstreamConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on. Reported verbatim by `/status`.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Alias tables for every normalizing source.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AliasConfig {
    pub sipgate: SipgateAliases,
    pub whatsapp: WhatsappAliases,
}

/// Key names probed in a telephony payload, in priority order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SipgateAliases {
    /// Caller number.
    pub from: Vec<String>,

    /// Called number.
    pub to: Vec<String>,

    /// Call direction.
    pub direction: Vec<String>,

    /// Direction reported when no alias is present.
    pub default_direction: String,
}

impl Default for SipgateAliases {
    fn default() -> Self {
        Self {
            from: aliases(&["from", "caller"]),
            to: aliases(&["to", "called"]),
            direction: aliases(&["direction"]),
            default_direction: "incoming".to_string(),
        }
    }
}

/// Key names probed in a messaging payload, in priority order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WhatsappAliases {
    /// Sender number or handle.
    pub from: Vec<String>,

    /// Message text.
    pub message: Vec<String>,
}

impl Default for WhatsappAliases {
    fn default() -> Self {
        Self {
            from: aliases(&["from", "sender"]),
            message: aliases(&["message", "text", "body"]),
        }
    }
}

fn aliases(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Transport-level limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 100 * 1024, // 100kb
        }
    }
}

/// Downstream automation consumer. Calls are simulated and only logged.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Name of the automation actor envelopes would be sent to.
    pub actor: String,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            actor: "apify".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listener.port, DEFAULT_PORT);
        assert_eq!(config.aliases.sipgate.from, vec!["from", "caller"]);
        assert_eq!(config.aliases.whatsapp.message, vec!["message", "text", "body"]);
        assert_eq!(config.limits.max_body_bytes, 100 * 1024);
    }

    #[test]
    fn test_partial_override() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            port = 8088

            [aliases.whatsapp]
            from = ["wa_id"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8088);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.aliases.whatsapp.from, vec!["wa_id"]);
        // Untouched tables keep their defaults.
        assert_eq!(config.aliases.whatsapp.message, vec!["message", "text", "body"]);
        assert_eq!(config.aliases.sipgate.default_direction, "incoming");
    }

    #[test]
    fn test_bind_address() {
        let listener = ListenerConfig {
            host: "127.0.0.1".into(),
            port: 4000,
        };
        assert_eq!(listener.bind_address(), "127.0.0.1:4000");
    }
}
