//! Sweet Shop Core
//!
//! Shared configuration for the sweet shop backend. The API server and the
//! admin provisioning tool both build their runtime settings from here, so
//! configuration semantics live in one place.

pub mod config;

pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig,
};
