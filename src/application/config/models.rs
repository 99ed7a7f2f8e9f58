use crate::common::constants::{
    DEFAULT_AUTH_COOKIE, DEFAULT_CONNECTION_STRING, DEFAULT_DATABASE_NAME,
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seconds to wait for a client before giving up on the connection
    pub client_timeout_secs: u64,

    /// Maximum request body size in bytes
    pub client_max_body_size: usize,

    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,

    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
}

/// Listening socket
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `memory://`, `mongodb://...` or `mongodb+srv://...`
    pub connection_string: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins that get an `Access-Control-Allow-Origin` echo; `*` allows any
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret used to verify session tokens
    pub jwt_secret: String,

    /// Cookie consulted when no `Authorization` header is sent
    pub cookie_name: String,

    /// Users allowed to create, update and delete topics
    pub admin_user_ids: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            client_max_body_size: DEFAULT_MAX_BODY_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cors: CorsConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
            name: DEFAULT_DATABASE_NAME.to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            cookie_name: DEFAULT_AUTH_COOKIE.to_string(),
            admin_user_ids: Vec::new(),
        }
    }
}
