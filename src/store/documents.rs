//! Document CRUD operations.

#![allow(clippy::missing_errors_doc)]

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::StoreError;

use super::core::DocumentStore;
use super::path::{self, child_prefix, depth, escape_like};
use super::types::Document;

impl DocumentStore {
    /// Insert a new document at `path`.
    ///
    /// `created` and `updated` are both set to the current time.
    pub async fn insert(&self, path: &str, data: &str) -> Result<(), StoreError> {
        self.check_initialized().await?;
        path::reject_digit_suffix(path)?;

        let now = self.now_millis();
        sqlx::query("INSERT INTO documents (path, data, created, updated) VALUES (?, ?, ?, ?)")
            .bind(path)
            .bind(data)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error("INSERT documents", &e))?;

        self.paths.insert(path);
        tracing::debug!(path, "document inserted");
        Ok(())
    }

    /// Read the document stored exactly at `path`.
    ///
    /// Returns `Ok(None)` if the path passed validation but the row is gone.
    pub async fn read(&self, path: &str) -> Result<Option<Document>, StoreError> {
        self.check_initialized().await?;
        self.validate_for_read(path, self.paths.contains(path))?;

        let row = sqlx::query("SELECT path, data, created, updated FROM documents WHERE path = ?")
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::read_error("SELECT documents", &e))?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    /// List the documents exactly one level below `path`, oldest first.
    pub async fn get_collection(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        self.check_initialized().await?;
        self.validate_for_read(path, self.paths.contains_collection(path))?;

        let prefix = child_prefix(path);
        let pattern = format!("{}%", escape_like(&prefix));
        let child_depth = i64::try_from(depth(&prefix)).map_err(|e| StoreError::Read {
            query: "SELECT documents collection".to_string(),
            message: e.to_string(),
        })?;

        let rows = sqlx::query(
            "SELECT path, data, created, updated FROM documents
             WHERE path LIKE ? ESCAPE '\\'
               AND SUBSTR(path, 1, LENGTH(?)) = ?
               AND path <> ?
               AND (LENGTH(path) - LENGTH(REPLACE(path, '/', ''))) = ?
             ORDER BY created, rowid",
        )
        .bind(&pattern)
        .bind(&prefix)
        .bind(&prefix)
        .bind(&prefix)
        .bind(child_depth)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::read_error("SELECT documents collection", &e))?;

        tracing::debug!(path, children = rows.len(), "collection listed");
        rows.iter().map(Self::row_to_document).collect()
    }

    /// Replace the payload at `path` and bump `updated`.
    ///
    /// Updating a path with no document is not an error.
    pub async fn update(&self, path: &str, data: &str) -> Result<(), StoreError> {
        self.check_initialized().await?;

        let result = sqlx::query("UPDATE documents SET data = ?, updated = ? WHERE path = ?")
            .bind(data)
            .bind(self.now_millis())
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error("UPDATE documents", &e))?;

        tracing::debug!(path, rows = result.rows_affected(), "document updated");
        Ok(())
    }

    /// Delete the document at `path`.
    ///
    /// Deleting a path with no document is not an error.
    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.check_initialized().await?;

        let result = sqlx::query("DELETE FROM documents WHERE path = ?")
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error("DELETE documents", &e))?;

        // A concurrent insert may own the path again after a zero-row delete.
        if result.rows_affected() > 0 {
            self.paths.remove(path);
        }
        tracing::debug!(path, rows = result.rows_affected(), "document deleted");
        Ok(())
    }

    fn validate_for_read(&self, path: &str, known: bool) -> Result<(), StoreError> {
        path::reject_digit_suffix(path)?;
        if !known {
            tracing::debug!(path, db = %self.database_path(), "path not in cache");
            return Err(StoreError::not_found(path));
        }
        Ok(())
    }

    fn row_to_document(row: &SqliteRow) -> Result<Document, StoreError> {
        let decode = |e: sqlx::Error| Self::read_error("decode documents row", &e);
        Ok(Document {
            path: row.try_get("path").map_err(decode)?,
            data: row.try_get("data").map_err(decode)?,
            created: row.try_get("created").map_err(decode)?,
            updated: row.try_get("updated").map_err(decode)?,
        })
    }
}
