//! Typed JSON access on top of any [`DocumentStoreTrait`].
//!
//! The store itself only understands strings; this wrapper serializes values
//! with `serde_json` on the way in and parses them on the way out.

#![allow(clippy::missing_errors_doc)]

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::traits::DocumentStoreTrait;

use super::types::Document;

/// JSON view over a document store.
#[derive(Debug)]
pub struct JsonDocuments<S> {
    store: S,
}

impl<S: DocumentStoreTrait> JsonDocuments<S> {
    /// Wrap `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Unwrap into the underlying store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Serialize `value` and insert it at `path`.
    pub async fn insert_json<T: Serialize + Sync>(
        &self,
        path: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let data = to_json(value)?;
        self.store.insert(path, &data).await
    }

    /// Serialize `value` and replace the payload at `path`.
    pub async fn update_json<T: Serialize + Sync>(
        &self,
        path: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let data = to_json(value)?;
        self.store.update(path, &data).await
    }

    /// Read and parse the document at `path`.
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, StoreError> {
        self.store
            .read(path)
            .await?
            .map(|doc| from_document(&doc))
            .transpose()
    }

    /// Parse every direct child of `path`, oldest first.
    pub async fn get_collection_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, StoreError> {
        self.store
            .get_collection(path)
            .await?
            .iter()
            .map(from_document)
            .collect()
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })
}

fn from_document<T: DeserializeOwned>(doc: &Document) -> Result<T, StoreError> {
    let data = doc
        .data
        .as_deref()
        .ok_or_else(|| StoreError::Serialization {
            message: format!("document {} has no payload", doc.path),
        })?;
    serde_json::from_str(data).map_err(|e| StoreError::Serialization {
        message: format!("document {}: {e}", doc.path),
    })
}
