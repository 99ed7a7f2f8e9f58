use crate::application::config::models::Config;
use crate::application::config::parser::{apply_env_overrides, parse_config, parse_config_file};
use crate::application::config::validator::validate_config;
use crate::common::error::Result;
use std::path::Path;

/// Load and validate configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an optional TOML file, then apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => parse_config_file(path)?,
            None => Config::default(),
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        validate_config(&config)?;
        Ok(config)
    }

    /// Load from a string, ignoring the process environment
    pub fn load_from_str(content: &str) -> Result<Config> {
        let config = parse_config(content)?;
        validate_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_str() {
        let config = ConfigLoader::load_from_str(
            r#"
            [auth]
            jwt_secret = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.jwt_secret, "secret");
    }

    #[test]
    fn test_load_from_str_validates() {
        assert!(ConfigLoader::load_from_str("client_timeout_secs = 0").is_err());
    }
}
