//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Upstream microservices reached through explicit proxy routes.
    pub services: ServicesConfig,

    /// Prefix rewrites for `/api` paths no explicit route handles.
    pub rewrites: Vec<RewriteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Demo record store settings.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 10_000,
        }
    }
}

/// How a service's non-success upstream replies are relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Wrap the raw upstream text as `{"error": "<Service> Error: <text>"}`.
    Wrap,
    /// Relay the upstream JSON body and status as they are.
    Passthrough,
}

/// A single upstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL (e.g., "http://localhost:8081"). Empty means unset.
    #[serde(default)]
    pub base_url: String,

    /// Relay policy for upstream rejections. Unset means the service's own
    /// default: `wrap` for user and location, `passthrough` for notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_policy: Option<ErrorPolicy>,
}

/// The upstream services behind the explicit proxy routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub user: ServiceConfig,
    pub location: ServiceConfig,
    pub notification: ServiceConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            user: ServiceConfig {
                base_url: "http://localhost:8081".to_string(),
                error_policy: None,
            },
            location: ServiceConfig {
                base_url: "http://localhost:8083".to_string(),
                error_policy: None,
            },
            // No default: must come from NOTIFICATION_BASE_URL or the file.
            notification: ServiceConfig {
                base_url: String::new(),
                error_policy: None,
            },
        }
    }
}

/// Prefix rewrite mapping `/api/<family>/...` to a target origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteConfig {
    /// Rule identifier for logging/metrics.
    pub name: String,

    /// Inbound path prefix, including the trailing slash. The bare path
    /// without the slash matches too.
    pub path_prefix: String,

    /// Target base URL. Empty means the rule is skipped.
    #[serde(default)]
    pub target: String,

    /// Environment variable that overrides `target` at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

/// Default rewrite table: `/api/<family>/:path*` → `<FAMILY>_API/:path*`.
pub fn default_rewrites() -> Vec<RewriteConfig> {
    [
        ("users", "/api/users/", "USER_API"),
        ("appointments", "/api/appointments/", "APPOINTMENT_API"),
        ("guest", "/api/guest/", "GUEST_API"),
        ("locations", "/api/locations/", "LOCATION_API"),
    ]
    .into_iter()
    .map(|(name, prefix, env)| RewriteConfig {
        name: name.to_string(),
        path_prefix: prefix.to_string(),
        target: String::new(),
        env: Some(env.to_string()),
    })
    .collect()
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for one upstream exchange (request + full response body).
    pub upstream_secs: u64,

    /// Inbound request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Demo record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding the key-value storage. `None` keeps it in memory.
    pub path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "coffeechat_gateway=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the `/admin` routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
    /// Maximum upstream body size buffered in bytes.
    pub max_upstream_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            max_upstream_body_size: 8 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [services.notification]
            base_url = "http://noti:8080"
            error_policy = "passthrough"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.user.base_url, "http://localhost:8081");
        assert_eq!(config.services.user.error_policy, None);
        assert_eq!(config.services.notification.base_url, "http://noti:8080");
        assert_eq!(config.timeouts.upstream_secs, 30);
        assert!(config.rewrites.is_empty());
    }

    #[test]
    fn test_error_policy_override() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [services.location]
            base_url = "http://loc:8083"
            error_policy = "passthrough"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.location.error_policy, Some(ErrorPolicy::Passthrough));
    }

    #[test]
    fn test_partial_service_table_keeps_policy_default() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [services.user]
            base_url = "http://users:8081"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.user.base_url, "http://users:8081");
        assert_eq!(config.services.user.error_policy, None);
        assert_eq!(config.services.location.base_url, "http://localhost:8083");
    }
}
