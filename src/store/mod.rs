//! Path-addressed document store.
//!
//! This module provides:
//! - [`DocumentStore`]: `SQLite`-backed CRUD over slash-separated paths
//! - [`Document`]: the stored record
//! - [`JsonDocuments`]: typed JSON access over any store
//!
//! # Architecture
//!
//! Every document lives in a single `documents` table keyed by `path`.
//! A collection is the set of documents exactly one level below a path,
//! found with a `LIKE` prefix match plus a separator count.
//!
//! The implementation is split across submodules:
//! - `core`: Construction, schema bootstrap, validation gate, close
//! - `documents`: Insert, read, collection, update, delete
//! - `path`: Path rules and the known-path cache
//! - `json`: `serde_json` wrapper
//! - `trait_impl`: `DocumentStoreTrait` implementation
//!
//! # Example
//!
//! ```no_run
//! use nolite::store::DocumentStore;
//!
//! # async fn demo() -> Result<(), nolite::error::StoreError> {
//! let store = DocumentStore::in_file("./data/docs.db").await?;
//! store.insert("/users/alice", r#"{"age":30}"#).await?;
//! let users = store.get_collection("/users").await?;
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

mod core;
mod documents;
mod json;
pub mod path;
mod trait_impl;
mod types;

pub use self::core::DocumentStore;
pub use json::JsonDocuments;
pub use types::{Document, IN_MEMORY};
