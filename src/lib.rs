//! nolite
//!
//! A minimal path-addressed document store on top of `SQLite`.
//!
//! # Features
//!
//! - Filesystem-like keys (`/users/alice`)
//! - Exact-path reads and direct-child collections
//! - Ephemeral (`:memory:`) or file-backed stores
//! - Async API via `sqlx`
//! - Optional typed JSON access
//!
//! # Quick Start
//!
//! ```no_run
//! use nolite::store::DocumentStore;
//!
//! # async fn demo() -> Result<(), nolite::error::StoreError> {
//! let store = DocumentStore::in_memory().await?;
//! store.insert("/notes/today", "buy milk").await?;
//! let note = store.read("/notes/today").await?;
//! assert_eq!(note.and_then(|d| d.data).as_deref(), Some("buy milk"));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   insert/read/…   ┌─────────────────┐
//! │   Caller    │──────────────────▶│  DocumentStore  │
//! │             │◀──────────────────│  (path cache)   │
//! └─────────────┘                   └────────┬────────┘
//!                                            │
//!                                            ▼
//!                                   SQLite `documents`
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;
pub mod traits;

#[cfg(test)]
mod test_utils;
