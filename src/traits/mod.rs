//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`DocumentStoreTrait`]: Document store abstraction
//! - [`TimeProvider`]: Time abstraction for testing
//!
//! # Mocking
//!
//! All traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use nolite::traits::{TimeProvider, RealTimeProvider};
//!
//! let time_provider = RealTimeProvider;
//! let now = time_provider.now();
//! println!("Current time: {now}");
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::store::Document;

/// Document store trait for mocking.
///
/// Abstracts the path-addressed CRUD surface so callers such as
/// [`crate::store::JsonDocuments`] can be tested without a database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStoreTrait: Send + Sync {
    /// Insert a new document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] for digit-suffixed paths and
    /// [`StoreError::Write`] if the path is already taken.
    async fn insert(&self, path: &str, data: &str) -> Result<(), StoreError>;

    /// Read the document stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the path is unknown.
    async fn read(&self, path: &str) -> Result<Option<Document>, StoreError>;

    /// List the direct children of `path`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing is stored at or below `path`.
    async fn get_collection(&self, path: &str) -> Result<Vec<Document>, StoreError>;

    /// Replace the payload stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the engine rejects the update.
    async fn update(&self, path: &str, data: &str) -> Result<(), StoreError>;

    /// Delete the document stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the engine rejects the delete.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

/// Time provider trait for mocking.
///
/// Document timestamps are taken from this clock.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time provider using system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(RealTimeProvider: Send, Sync, Clone, Copy, Default);

    #[test]
    fn test_real_time_provider_now() {
        let provider = RealTimeProvider;
        let before = Utc::now();
        let now = provider.now();
        let after = Utc::now();
        assert!(now >= before);
        assert!(now <= after);
    }

    #[test]
    fn test_mock_time_provider() {
        let fixed = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let mut mock = MockTimeProvider::new();
        mock.expect_now().times(2).return_const(fixed);

        assert_eq!(mock.now(), fixed);
        assert_eq!(mock.now().timestamp_millis(), 1_700_000_000_123);
    }

    #[tokio::test]
    async fn test_mock_document_store() {
        let mut mock = MockDocumentStoreTrait::new();
        mock.expect_read()
            .withf(|path| path == "/a/b")
            .returning(|path| Ok(Some(Document::new(path, Some("x".into()), 1, 1))));

        let doc = mock.read("/a/b").await.unwrap().unwrap();
        assert_eq!(doc.path, "/a/b");
        assert_eq!(doc.data.as_deref(), Some("x"));
    }
}
