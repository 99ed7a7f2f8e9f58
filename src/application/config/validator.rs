use crate::application::config::models::{AuthConfig, Config, CorsConfig, DatabaseConfig};
use crate::common::error::{Result, ServerError};

/// Validate configuration for correctness and consistency
pub fn validate_config(config: &Config) -> Result<()> {
    validate_global_settings(config)?;
    validate_database(&config.database)?;
    validate_cors(&config.cors)?;
    validate_auth(&config.auth)?;
    Ok(())
}

fn validate_global_settings(config: &Config) -> Result<()> {
    if config.client_timeout_secs == 0 {
        return Err(ServerError::ConfigError(
            "client_timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.client_max_body_size == 0 {
        return Err(ServerError::ConfigError(
            "client_max_body_size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_database(database: &DatabaseConfig) -> Result<()> {
    if database.connection_string.trim().is_empty() {
        return Err(ServerError::ConfigError(
            "database.connection_string must not be empty".to_string(),
        ));
    }

    if database.name.trim().is_empty() {
        return Err(ServerError::ConfigError(
            "database.name must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<()> {
    if let Some(blank) = cors.allowed_origins.iter().position(|o| o.trim().is_empty()) {
        return Err(ServerError::ConfigError(format!(
            "cors.allowed_origins[{}] is blank",
            blank
        )));
    }
    Ok(())
}

fn validate_auth(auth: &AuthConfig) -> Result<()> {
    if auth.jwt_secret.is_empty() {
        return Err(ServerError::ConfigError(
            "auth.jwt_secret must be set (or JWT_SECRET exported)".to_string(),
        ));
    }

    if auth.cookie_name.trim().is_empty() || auth.cookie_name.contains([';', '=', ' ']) {
        return Err(ServerError::ConfigError(format!(
            "auth.cookie_name {:?} is not a valid cookie name",
            auth.cookie_name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = valid_config();
        config.client_timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.client_max_body_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_database_settings_required() {
        let mut config = valid_config();
        config.database.name = "  ".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.database.connection_string.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_secret_rejected() {
        let config = Config::default();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_blank_origin_rejected() {
        let mut config = valid_config();
        config.cors.allowed_origins = vec!["https://a.test".to_string(), "".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
