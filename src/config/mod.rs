//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use nolite::config::{Config, DEFAULT_DATABASE_PATH};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_path: DEFAULT_DATABASE_PATH.to_string(),
//!     log_level: "info".to_string(),
//!     max_connections: 5,
//!     busy_timeout_ms: 5000,
//! };
//!
//! assert!(!config.is_in_memory());
//! ```

mod validation;

pub use validation::{validate_config, MAX_BUSY_TIMEOUT_MS, MAX_CONNECTIONS};

use std::time::Duration;

use tracing_subscriber::filter::EnvFilter;

use crate::error::ConfigError;
use crate::store::IN_MEMORY;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/nolite.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default size of the connection pool for file-backed stores.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default `SQLite` busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database file path, or `:memory:` for an ephemeral store.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Maximum pooled connections for file-backed stores.
    pub max_connections: u32,
    /// How long `SQLite` waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to the database file (default: `./data/nolite.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `MAX_CONNECTIONS`: Pool size for file-backed stores (default: `5`)
    /// - `BUSY_TIMEOUT_MS`: `SQLite` busy timeout (default: `5000`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `MAX_CONNECTIONS` or `BUSY_TIMEOUT_MS` is not a valid integer
    /// - Any value fails validation (see [`validate_config`])
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let max_connections = parse_env_u32("MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let busy_timeout_ms = parse_env_u64("BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;

        let config = Self {
            database_path,
            log_level,
            max_connections,
            busy_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Whether this configuration selects an ephemeral store.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY
    }

    /// Log filter built from `log_level`, falling back to `info` when the
    /// directive does not parse.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        self.log_level
            .parse()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }

    /// The busy timeout as a [`Duration`].
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
