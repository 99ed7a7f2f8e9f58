use crate::application::config::models::Config;
use crate::common::error::{Result, ServerError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse configuration from a TOML file
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        ServerError::ConfigError(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    debug!(path = %path.display(), "read configuration file");

    parse_config(&content)
}

/// Parse configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content)
        .map_err(|e| ServerError::ConfigError(format!("Failed to parse TOML config: {}", e)))
}

/// Environment variables that override file settings
pub mod env_keys {
    pub const DB_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
    pub const DATABASE_NAME: &str = "DATABASE_NAME";
    pub const ALLOW_ORIGINS: &str = "ALLOW_ORIGINS";
    pub const JWT_SECRET: &str = "JWT_SECRET";
    pub const ADMIN_USER_IDS: &str = "ADMIN_USER_IDS";
}

/// Overlay environment values onto a parsed configuration.
///
/// `lookup` is `std::env::var` in production; tests pass a closure over a map.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(env_keys::DB_CONNECTION_STRING) {
        config.database.connection_string = value;
    }
    if let Some(value) = lookup(env_keys::DATABASE_NAME) {
        config.database.name = value;
    }
    if let Some(value) = lookup(env_keys::ALLOW_ORIGINS) {
        config.cors.allowed_origins = split_list(&value);
    }
    if let Some(value) = lookup(env_keys::JWT_SECRET) {
        config.auth.jwt_secret = value;
    }
    if let Some(value) = lookup(env_keys::ADMIN_USER_IDS) {
        config.auth.admin_user_ids = split_list(&value);
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
