//! Configuration loading from disk and the process environment.

use std::path::Path;
use std::fs;
use crate::config::schema::{default_rewrites, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the notification service. Required.
pub const NOTIFICATION_BASE_URL: &str = "NOTIFICATION_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    MissingEnv(&'static str),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::MissingEnv(key) => {
                write!(f, "Required environment variable {} is not set", key)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load configuration from an optional TOML file, overlay the process
/// environment, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let base = match path {
        Some(p) => read_config_file(p)?,
        None => GatewayConfig::default(),
    };

    let config = apply_env(base, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts `std::env::var` so the overlay can be exercised
/// without touching the process environment.
pub fn apply_env<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(bind) = get("GATEWAY_BIND") {
        config.listener.bind_address = bind;
    }
    if let Some(url) = get("USER_SERVICE_URL") {
        config.services.user.base_url = url;
    }
    if let Some(url) = get("LOCATION_SERVICE_URL") {
        config.services.location.base_url = url;
    }
    if let Some(url) = get(NOTIFICATION_BASE_URL) {
        config.services.notification.base_url = url;
    }
    if config.services.notification.base_url.is_empty() {
        return Err(ConfigError::MissingEnv(NOTIFICATION_BASE_URL));
    }
    if let Some(path) = get("GATEWAY_STORE_PATH") {
        config.store.path = Some(path);
    }

    if config.rewrites.is_empty() {
        config.rewrites = default_rewrites();
    }
    for rule in config.rewrites.iter_mut() {
        if let Some(target) = rule.env.as_deref().and_then(|key| get(key)) {
            rule.target = target;
        }
    }

    Ok(config)
}
