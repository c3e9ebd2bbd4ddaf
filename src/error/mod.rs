//! Error types for the nolite document store.
//!
//! This module defines a small error hierarchy:
//! - [`AppError`]: Top-level application errors
//! - [`StoreError`]: Document store errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps all subsystem errors for unified error handling in the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Document store errors.
///
/// Every store operation either succeeds completely or returns one of these.
/// Nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The path is malformed or reserved.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The referenced document path or database file does not exist.
    #[error("Not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: String,
    },

    /// The `documents` table is missing or could not be checked.
    #[error("Database not initialized: {message}")]
    NotInitialized {
        /// Description of the failure.
        message: String,
    },

    /// A read query failed in the engine.
    #[error("Read failed: {query} - {message}")]
    Read {
        /// Short name of the query that failed.
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// A write query failed in the engine.
    #[error("Write failed: {query} - {message}")]
    Write {
        /// Short name of the query that failed.
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// Filesystem or handle failure.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },

    /// The store has been closed.
    #[error("Store is closed")]
    Closed,

    /// A payload could not be converted to or from JSON.
    #[error("Serialization failed: {message}")]
    Serialization {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Build an [`StoreError::InvalidPath`].
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a [`StoreError::NotFound`].
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
