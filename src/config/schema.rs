//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToadConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Shared key-value store connection.
    pub store: StoreConfig,

    /// Stateful/stateless mode switch.
    pub mode: ModeConfig,

    /// Identity of this host in the fleet.
    pub host: HostConfig,

    /// Key layout inside the store.
    pub keys: KeyConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ToadConfig {
    /// Socket address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// HTTP listen port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Store connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store hostname or IP.
    pub host: String,

    pub port: u16,

    /// Optional password (AUTH).
    pub password: Option<String>,

    /// Logical database index.
    pub db: i64,

    /// Deadline for establishing the connection, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Deadline for a single command, in milliseconds.
    pub command_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            db: 0,
            connect_timeout_ms: 2_000,
            command_timeout_ms: 1_000,
        }
    }
}

/// Mode switch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Environment variable holding the stateful flag. Re-read on every call.
    pub env_var: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            env_var: "IS_STATEFUL".to_string(),
        }
    }
}

/// Host identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Host identifier used for the per-host flag. Resolved from the machine
    /// when unset.
    pub name: Option<String>,
}

impl HostConfig {
    /// The configured name, or the machine's hostname.
    pub fn resolve(&self) -> String {
        self.name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(local_hostname)
    }
}

/// Machine hostname as reported by the OS, or `localhost` when it cannot be
/// read.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Key layout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Namespace prefix for every key.
    pub prefix: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            prefix: "toad".to_string(),
        }
    }
}

/// Timeout configuration for HTTP handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

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
            log_format: LogFormat::Json,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToadConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.store.port, 6379);
        assert_eq!(config.mode.env_var, "IS_STATEFUL");
        assert_eq!(config.keys.prefix, "toad");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ToadConfig = toml::from_str(
            r#"
            [store]
            host = "redis.internal"

            [host]
            name = "web-1"

            [observability]
            log_format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.host, "redis.internal");
        assert_eq!(config.store.port, 6379);
        assert_eq!(config.host.resolve(), "web-1");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_blank_host_name_falls_back() {
        let host = HostConfig {
            name: Some("  ".to_string()),
        };
        assert!(!host.resolve().trim().is_empty());
    }

    #[test]
    fn test_default_host_uses_os_hostname() {
        let expected = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "localhost".to_string());

        // A stale shell variable must not shadow the real machine name.
        std::env::set_var("HOSTNAME", "stale-shell-name");
        let resolved = HostConfig::default().resolve();
        std::env::remove_var("HOSTNAME");

        assert_eq!(resolved, expected);
        assert_ne!(resolved, "stale-shell-name");
    }

    #[test]
    fn test_configured_host_name_wins() {
        let host = HostConfig {
            name: Some("web-9".to_string()),
        };
        assert_eq!(host.resolve(), "web-9");
    }
}
