//! Configuration validation.
//!
//! Ensures configuration values are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Maximum allowed pool size.
pub const MAX_CONNECTIONS: u32 = 64;

/// Maximum allowed busy timeout in milliseconds (5 minutes).
pub const MAX_BUSY_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `MAX_CONNECTIONS` must be between 1 and 64
/// - `BUSY_TIMEOUT_MS` must be at most 300000
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.max_connections == 0 || config.max_connections > MAX_CONNECTIONS {
        return Err(ConfigError::InvalidValue {
            var: "MAX_CONNECTIONS".into(),
            reason: format!("must be between 1 and {MAX_CONNECTIONS}"),
        });
    }

    if config.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "BUSY_TIMEOUT_MS".into(),
            reason: format!("must be between 0 and {MAX_BUSY_TIMEOUT_MS} ms"),
        });
    }

    Ok(())
}
