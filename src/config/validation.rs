//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate upstream base URLs (absolute, http)
//! - Validate value ranges (timeouts > 0)
//! - Detect conflicting rewrite rules
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new("listener.max_connections", "must be > 0"));
    }

    let services = [
        ("services.user.base_url", &config.services.user.base_url),
        ("services.location.base_url", &config.services.location.base_url),
        ("services.notification.base_url", &config.services.notification.base_url),
    ];
    for (field, url) in services {
        if let Err(message) = check_http_url(url) {
            errors.push(ValidationError::new(field, message));
        }
    }

    let mut names = HashSet::new();
    for (i, rule) in config.rewrites.iter().enumerate() {
        if !names.insert(rule.name.as_str()) {
            errors.push(ValidationError::new(
                format!("rewrites[{}].name", i),
                format!("duplicate rule name '{}'", rule.name),
            ));
        }
        if !rule.path_prefix.starts_with("/api/") {
            errors.push(ValidationError::new(
                format!("rewrites[{}].path_prefix", i),
                "must start with /api/",
            ));
        }
        if !rule.target.is_empty() {
            if let Err(message) = check_http_url(&rule.target) {
                errors.push(ValidationError::new(format!("rewrites[{}].target", i), message));
            }
        }
    }

    let timeouts = [
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::new(field, "must be > 0"));
        }
    }

    if config.admin.enabled && config.admin.api_key.is_empty() {
        errors.push(ValidationError::new("admin.api_key", "must be set when admin is enabled"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err("must be set".to_string());
    }
    let url = Url::parse(raw).map_err(|e| format!("'{}' is not a valid URL: {}", raw, e))?;
    if url.scheme() != "http" {
        return Err(format!("'{}' must use http://", raw));
    }
    if url.host_str().is_none() {
        return Err(format!("'{}' has no host", raw));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RewriteConfig;

    fn valid() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.services.notification.base_url = "http://noti:8085".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid();
        config.services.user.base_url = "not a url".to_string();
        config.services.location.base_url = "https://loc:8083".to_string();
        config.timeouts.upstream_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "services.user.base_url",
                "services.location.base_url",
                "timeouts.upstream_secs",
            ]
        );
    }

    #[test]
    fn test_rewrite_rules_checked() {
        let mut config = valid();
        config.rewrites = vec![
            RewriteConfig {
                name: "guest".into(),
                path_prefix: "/guest/".into(),
                target: String::new(),
                env: None,
            },
            RewriteConfig {
                name: "guest".into(),
                path_prefix: "/api/guest/".into(),
                target: "ftp://guest".into(),
                env: None,
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "rewrites[0].path_prefix");
        assert_eq!(errors[1].field, "rewrites[1].name");
        assert_eq!(errors[2].field, "rewrites[1].target");
    }

    #[test]
    fn test_unset_notification_rejected() {
        let config = GatewayConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "services.notification.base_url: must be set");
    }
}
