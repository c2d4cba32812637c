//! Application configuration
//!
//! Settings are built from development defaults, then overridden by a TOML
//! file and/or environment variables. The server loads configuration once at
//! startup and threads it through application state; nothing in this crate
//! reads the environment after that point.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. An empty list falls back to a permissive
    /// policy, which is only suitable for local development.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sweetshop.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Token signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens.
    pub secret_key: String,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "development-secret-key-change-in-production".to_string(),
            token_ttl_minutes: 30,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        if let Ok(max) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections =
                max.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DATABASE_MAX_CONNECTIONS".to_string(),
                    value: max,
                })?;
        }

        if let Ok(secret) = std::env::var("SECRET_KEY") {
            config.auth.secret_key = secret;
        }

        if let Ok(ttl) = std::env::var("TOKEN_TTL_MINUTES") {
            config.auth.token_ttl_minutes =
                ttl.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TOKEN_TTL_MINUTES".to_string(),
                    value: ttl,
                })?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file. Missing sections and fields take
    /// their default values.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path,
            message: e.to_string(),
        })
    }

    /// Merge environment variables on top of this configuration. Environment
    /// values win wherever they differ from the defaults.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env = Self::from_env()?;
        let defaults = Self::default();

        if env.server.host != defaults.server.host {
            self.server.host = env.server.host;
        }
        if env.server.port != defaults.server.port {
            self.server.port = env.server.port;
        }
        if env.server.cors_origins != defaults.server.cors_origins {
            self.server.cors_origins = env.server.cors_origins;
        }
        if env.database.url != defaults.database.url {
            self.database.url = env.database.url;
        }
        if env.database.max_connections != defaults.database.max_connections {
            self.database.max_connections = env.database.max_connections;
        }
        if env.auth.secret_key != defaults.auth.secret_key {
            self.auth.secret_key = env.auth.secret_key;
        }
        if env.auth.token_ttl_minutes != defaults.auth.token_ttl_minutes {
            self.auth.token_ttl_minutes = env.auth.token_ttl_minutes;
        }
        if env.logging.level != defaults.logging.level {
            self.logging.level = env.logging.level;
        }

        Ok(self)
    }
}
