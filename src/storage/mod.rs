//! Pluggable key-value persistence
//!
//! Every document collection is stored as one JSON value under a fixed key.
//! Backends only move strings; typed access goes through [`read_json`] and
//! [`write_json`] or the repositories in [`repository`].

pub mod file;
pub mod memory;
pub mod repository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{
    BrochureRepository, KvRepository, MediaRepository, SiteRepository, TemplateRepository,
};

/// Fixed storage keys
pub mod keys {
    /// `Vec<Template>`
    pub const TEMPLATES: &str = "brochure-templates";
    /// `Vec<GeneratedBrochure>`
    pub const BROCHURES: &str = "generated-brochures";
    /// `Vec<Site>`
    pub const SITES: &str = "wb2:sites";
    /// Map of slug to published snapshot
    pub const PUBLISHED_SITES: &str = "wb2:published-sites";
    /// `Vec<MediaAsset>`
    pub const MEDIA: &str = "wb2:media";

    /// Session-store key holding an unpublished site preview.
    pub fn preview_site(slug: &str) -> String {
        format!("wb2:preview-site:{}", slug)
    }

    /// Session-store key holding a brochure preview.
    pub fn brochure_preview(public_id: &str) -> String {
        format!("brochure-preview:{}", public_id)
    }
}

/// Minimal string key-value store
///
/// Implementations must be safe to share between threads. There are no
/// transactions: concurrent writers to the same key race and the last one
/// wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON value. A missing key is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

/// Read a JSON array one record at a time. Records that do not decode are
/// skipped with a warning; only a value that is not an array is an error.
pub fn read_records<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let values: Vec<serde_json::Value> = read_json(store, key)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect())
}

/// Encode and write a JSON value.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Serialization(format!("{}: {}", key, e)))?;
    debug!(key, bytes = raw.len(), "store write");
    store.set(key, raw)
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend refused the operation (quota, offline, closed)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
