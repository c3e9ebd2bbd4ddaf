//! Core document store: construction, schema bootstrap and lifecycle.
//!
//! This module provides the [`DocumentStore`] struct and the checks every
//! operation runs before touching the `documents` table.

#![allow(clippy::missing_errors_doc)]

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::{Config, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_CONNECTIONS};
use crate::error::StoreError;
use crate::traits::{RealTimeProvider, TimeProvider};

use super::path::{PathCache, SEPARATOR};
use super::types::IN_MEMORY;

/// Connection settings applied when opening the backing database.
#[derive(Debug, Clone, Copy)]
struct ConnectSettings {
    max_connections: u32,
    busy_timeout: Duration,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl From<&Config> for ConnectSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_connections: config.max_connections,
            busy_timeout: config.busy_timeout(),
        }
    }
}

/// Path-addressed document store backed by `SQLite`.
///
/// The store exclusively owns its connection pool. Call [`DocumentStore::close`]
/// once when done; every operation after that fails with [`StoreError::Closed`].
pub struct DocumentStore {
    pub(crate) pool: SqlitePool,
    pub(crate) paths: PathCache,
    pub(crate) clock: Arc<dyn TimeProvider>,
    closed: AtomicBool,
    database_path: String,
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("database_path", &self.database_path)
            .field("documents", &self.paths.len())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    /// Create a transient store that is never written to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the engine cannot be started.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::in_memory_with(ConnectSettings::default()).await
    }

    /// Open the store at `database_path`, creating the file and any missing
    /// parent directories first.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidPath`] if the path starts with `:memory:` or
    ///   ends with a path separator
    /// - [`StoreError::Io`] if directories cannot be created
    pub async fn in_file(database_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::in_file_with(database_path.as_ref(), ConnectSettings::default()).await
    }

    /// Open an existing store file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no file exists at `database_path`.
    pub async fn from_file(database_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_file_with(database_path.as_ref(), ConnectSettings::default()).await
    }

    /// Open the store described by `config`.
    ///
    /// `:memory:` selects [`DocumentStore::in_memory`]; anything else goes
    /// through [`DocumentStore::in_file`].
    pub async fn open(config: &Config) -> Result<Self, StoreError> {
        let settings = ConnectSettings::from(config);
        if config.is_in_memory() {
            Self::in_memory_with(settings).await
        } else {
            Self::in_file_with(Path::new(&config.database_path), settings).await
        }
    }

    /// Replace the clock used to stamp `created` and `updated`.
    #[must_use]
    pub fn with_time_provider(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    async fn in_memory_with(settings: ConnectSettings) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Io {
                message: format!("Invalid memory database options: {e}"),
            })?
            .busy_timeout(settings.busy_timeout);

        // Every connection to :memory: is its own database, so keep exactly
        // one and never let the pool recycle it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Io {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        Self::initialize(pool, IN_MEMORY.to_string()).await
    }

    async fn in_file_with(path: &Path, settings: ConnectSettings) -> Result<Self, StoreError> {
        let shown = path.to_string_lossy();

        if shown.starts_with(IN_MEMORY) {
            return Err(StoreError::invalid_path(
                &shown,
                format!("must not start with '{IN_MEMORY}'"),
            ));
        }
        if shown.ends_with(SEPARATOR) || shown.ends_with(std::path::MAIN_SEPARATOR) {
            return Err(StoreError::invalid_path(
                &shown,
                "must not end with a path separator",
            ));
        }

        if path.exists() {
            return Self::from_file_with(path, settings).await;
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        tracing::info!(path = %shown, "creating document store");
        Self::connect(path, true, settings).await
    }

    async fn from_file_with(path: &Path, settings: ConnectSettings) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::not_found(path.to_string_lossy()));
        }
        tracing::info!(path = %path.display(), "opening document store");
        Self::connect(path, false, settings).await
    }

    async fn connect(
        path: &Path,
        create: bool,
        settings: ConnectSettings,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Io {
                message: format!("Failed to connect to database: {e}"),
            })?;

        Self::initialize(pool, path.to_string_lossy().into_owned()).await
    }

    /// Bootstrap the schema and warm the path cache.
    async fn initialize(pool: SqlitePool, database_path: String) -> Result<Self, StoreError> {
        let store = Self {
            pool,
            paths: PathCache::default(),
            clock: Arc::new(RealTimeProvider),
            closed: AtomicBool::new(false),
            database_path,
        };
        store.run_migrations().await?;
        store.load_paths().await?;

        tracing::debug!(
            path = %store.database_path,
            documents = store.paths.len(),
            "document store ready"
        );
        Ok(store)
    }

    /// Create the `documents` table if it does not exist yet.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        let schema = include_str!("../../migrations/001_documents.sql");
        sqlx::query(schema)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::NotInitialized {
                message: format!("Failed to create documents table: {e}"),
            })?;
        Ok(())
    }

    async fn load_paths(&self) -> Result<(), StoreError> {
        let paths = sqlx::query_scalar::<_, String>("SELECT path FROM documents")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::read_error("SELECT documents.path", &e))?;
        self.paths.extend(paths);
        Ok(())
    }

    /// Fail with [`StoreError::Closed`] once the handle has been released.
    pub(crate) fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    /// Confirm the store is open and the `documents` table exists.
    pub(crate) async fn check_initialized(&self) -> Result<(), StoreError> {
        self.ensure_open()?;

        let table = sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::NotInitialized {
            message: format!("Failed to inspect schema: {e}"),
        })?;

        match table {
            Some(_) => Ok(()),
            None => Err(StoreError::NotInitialized {
                message: "documents table is missing".to_string(),
            }),
        }
    }

    /// Release the backing handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the store was already closed.
    pub async fn close(&self) -> Result<(), StoreError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::Closed);
        }
        self.pool.close().await;
        tracing::info!(path = %self.database_path, "document store closed");
        Ok(())
    }

    /// Whether [`DocumentStore::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.pool.is_closed()
    }

    /// The path the store was opened with, or `:memory:`.
    #[must_use]
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// Sorted snapshot of every known document path.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.snapshot()
    }

    /// Get a clone of the connection pool.
    #[must_use]
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    pub(crate) fn now_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    pub(crate) fn read_error(query: &str, e: &sqlx::Error) -> StoreError {
        StoreError::Read {
            query: query.to_string(),
            message: e.to_string(),
        }
    }

    pub(crate) fn write_error(query: &str, e: &sqlx::Error) -> StoreError {
        StoreError::Write {
            query: query.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod tests {
    use super::*;
    use crate::test_utils::SteppingClock;
    use tempfile::TempDir;

    pub(crate) async fn test_store() -> DocumentStore {
        DocumentStore::in_memory()
            .await
            .expect("Failed to create test store")
    }

    /// In-memory store whose clock advances 1ms per call.
    pub(crate) async fn test_store_with_clock() -> DocumentStore {
        test_store()
            .await
            .with_time_provider(Arc::new(SteppingClock::new(1_000)))
    }

    #[tokio::test]
    async fn test_in_memory() {
        let store = test_store().await;
        assert_eq!(store.database_path(), IN_MEMORY);
        assert!(store.paths().is_empty());
        assert!(!store.is_closed());
    }

    #[tokio::test]
    async fn test_bootstrap_creates_table() {
        let store = test_store().await;
        assert!(store.check_initialized().await.is_ok());
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let store = test_store().await;
        assert!(store.run_migrations().await.is_ok());
        assert!(store.check_initialized().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_table_not_initialized() {
        let store = test_store().await;
        sqlx::query("DROP TABLE documents")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.check_initialized().await;
        assert!(matches!(result, Err(StoreError::NotInitialized { .. })));
    }

    #[tokio::test]
    async fn test_in_file_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("deeply").join("nested").join("docs.db");

        let store = DocumentStore::in_file(&db_path).await.unwrap();
        assert!(db_path.is_file());
        assert_eq!(store.database_path(), db_path.to_string_lossy());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_in_file_rejects_memory_sentinel() {
        let result = DocumentStore::in_file(":memory:").await;
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));

        let result = DocumentStore::in_file(":memory:test.db").await;
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }

    #[tokio::test]
    async fn test_in_file_rejects_trailing_separator() {
        let temp_dir = TempDir::new().unwrap();
        let dir = format!("{}/", temp_dir.path().join("docs").display());

        let result = DocumentStore::in_file(&dir).await;
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }

    #[tokio::test]
    async fn test_in_file_directory_creation_failure_is_io() {
        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("plain");
        std::fs::write(&plain, b"not a directory").unwrap();
        let db_path = plain.join("sub").join("d.db");

        let result = DocumentStore::in_file(&db_path).await;
        assert!(
            matches!(result, Err(StoreError::Io { message }) if message.contains("database directory"))
        );
    }

    #[tokio::test]
    async fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("invalid").join("invalid.db");

        let result = DocumentStore::from_file(&db_path).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(!db_path.exists());
    }

    #[tokio::test]
    async fn test_from_file_existing() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("valid.db");

        let origin = DocumentStore::in_file(&db_path).await.unwrap();
        origin.close().await.unwrap();

        let store = DocumentStore::from_file(&db_path).await.unwrap();
        assert!(store.check_initialized().await.is_ok());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            database_path: temp_dir.path().join("cfg.db").to_string_lossy().into_owned(),
            max_connections: 2,
            busy_timeout_ms: 100,
            ..Config::default()
        };
        let store = DocumentStore::open(&config).await.unwrap();
        assert_eq!(store.database_path(), config.database_path);
        store.close().await.unwrap();

        let memory = Config {
            database_path: IN_MEMORY.to_string(),
            ..Config::default()
        };
        let store = DocumentStore::open(&memory).await.unwrap();
        assert_eq!(store.database_path(), IN_MEMORY);
    }

    #[tokio::test]
    async fn test_close_twice() {
        let store = test_store().await;
        assert!(store.close().await.is_ok());
        assert!(store.is_closed());
        assert_eq!(store.close().await, Err(StoreError::Closed));
    }

    #[tokio::test]
    async fn test_concurrent_close_succeeds_once() {
        let store = test_store().await;
        let (first, second) = tokio::join!(store.close(), store.close());

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes.contains(&Err(StoreError::Closed)));
        assert!(store.is_closed());
    }

    #[tokio::test]
    async fn test_check_initialized_after_close() {
        let store = test_store().await;
        store.close().await.unwrap();
        assert_eq!(store.check_initialized().await, Err(StoreError::Closed));
    }

    #[tokio::test]
    async fn test_debug_output() {
        let store = test_store().await;
        let debug = format!("{store:?}");
        assert!(debug.contains("DocumentStore"));
        assert!(debug.contains(":memory:"));
    }

    #[tokio::test]
    async fn test_pool_is_shared() {
        let store = test_store().await;
        let pool = store.pool();
        let result = sqlx::query("SELECT 1 as value").fetch_one(&pool).await;
        assert!(result.is_ok());
    }
}
