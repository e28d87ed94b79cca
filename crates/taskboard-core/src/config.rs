//! Taskboard configuration management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults for development. The JWT signing secret has no
//! default: a process without one must fail at startup, not issue weakly
//! signed tokens.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JWT_SECRET is unset or empty. Startup-fatal.
    #[error("JWT_SECRET is not set; refusing to start without a signing secret")]
    MissingJwtSecret,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins (comma-separated)
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Auth
        config.auth.jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?;
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.auth.jwt_issuer = issuer;
        }
        if let Ok(days) = std::env::var("JWT_VALIDITY_DAYS") {
            config.auth.token_validity_days =
                days.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "JWT_VALIDITY_DAYS".to_string(),
                    value: days,
                })?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that must not reach the serving loop.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            // Empty by default - set via CORS_ORIGINS env var
            cors_origins: vec![],
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for tokens. Required, no default.
    pub jwt_secret: String,

    /// Token issuer identifier
    pub jwt_issuer: String,

    /// Token validity window in days
    pub token_validity_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "taskboard-api".to_string(),
            token_validity_days: 365,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "taskboard_api=debug,tower_http=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_validity_days, 365);
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingJwtSecret)
        ));
    }

    #[test]
    fn from_file_parses_toml() {
        let path = std::env::temp_dir().join("taskboard-config-test.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            cors_origins = []

            [auth]
            jwt_secret = "file-secret"
            jwt_issuer = "taskboard-test"
            token_validity_days = 30

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.jwt_secret, "file-secret");
        assert_eq!(config.auth.token_validity_days, 30);
    }

    #[test]
    fn from_file_rejects_missing_secret() {
        let path = std::env::temp_dir().join("taskboard-config-nosecret.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            cors_origins = []

            [auth]
            jwt_secret = ""
            jwt_issuer = "taskboard-test"
            token_validity_days = 365

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));
    }
}
