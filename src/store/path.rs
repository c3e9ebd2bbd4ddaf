//! Path rules and the in-memory path cache.
//!
//! Paths are `/`-separated keys. A path may not end with an ASCII digit;
//! that suffix is reserved for indexing into arrays.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;

/// Path segment separator.
pub const SEPARATOR: char = '/';

/// Whether `path` ends with an ASCII digit.
#[must_use]
pub fn ends_with_digit(path: &str) -> bool {
    path.chars().last().is_some_and(|c| c.is_ascii_digit())
}

/// Reject paths that end with a digit.
pub(crate) fn reject_digit_suffix(path: &str) -> Result<(), StoreError> {
    if ends_with_digit(path) {
        tracing::warn!(path, "rejected digit-suffixed path");
        return Err(StoreError::invalid_path(path, "must not end with a digit"));
    }
    Ok(())
}

/// Prefix shared by every direct child of `path`.
///
/// `/a` and `/a/` both yield `/a/`.
#[must_use]
pub fn child_prefix(path: &str) -> String {
    if path.ends_with(SEPARATOR) {
        path.to_string()
    } else {
        format!("{path}{SEPARATOR}")
    }
}

/// Number of separators in `path`, i.e. its depth.
#[must_use]
pub fn depth(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}

/// Escape `LIKE` wildcards so `prefix` matches literally under `ESCAPE '\'`.
#[must_use]
pub fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Set of document paths known to exist in the backing table.
///
/// Reads and collection listings are gated on this set. The store keeps it in
/// step with the table: warmed on open, extended on insert, pruned on delete.
#[derive(Debug, Default)]
pub(crate) struct PathCache {
    paths: RwLock<BTreeSet<String>>,
}

impl PathCache {
    fn read_guard(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.paths.read().unwrap_or_else(|poison_error| {
            tracing::warn!("Reading path cache from poisoned lock, using recovered data");
            PoisonError::into_inner(poison_error)
        })
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.paths.write().unwrap_or_else(|poison_error| {
            tracing::warn!("Writing path cache through poisoned lock, using recovered data");
            PoisonError::into_inner(poison_error)
        })
    }

    pub(crate) fn insert(&self, path: &str) {
        self.write_guard().insert(path.to_string());
    }

    pub(crate) fn remove(&self, path: &str) {
        self.write_guard().remove(path);
    }

    pub(crate) fn extend(&self, paths: impl IntoIterator<Item = String>) {
        self.write_guard().extend(paths);
    }

    /// Whether a document is stored exactly at `path`.
    pub(crate) fn contains(&self, path: &str) -> bool {
        self.read_guard().contains(path)
    }

    /// Whether `path` is a document or has at least one document below it.
    pub(crate) fn contains_collection(&self, path: &str) -> bool {
        let paths = self.read_guard();
        if paths.contains(path) {
            return true;
        }
        let prefix = child_prefix(path);
        paths
            .range(prefix.clone()..)
            .next()
            .is_some_and(|candidate| candidate.starts_with(&prefix))
    }

    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.read_guard().iter().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.read_guard().len()
    }
}
