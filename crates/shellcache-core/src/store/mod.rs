//! Versioned key-value cache store.
//!
//! This module provides the `CacheStore` trait: a bucket-namespaced store
//! where keys are request identifiers and values are captured response
//! snapshots. Exactly one bucket is authoritative at a time; buckets left
//! over from prior versions are deleted during activation.
//!
//! Two implementations ship with the crate:
//! - `MemoryStore`: in-process, the default for tests and embedding
//! - `DiskStore`: one directory per bucket, one JSON file per entry

pub mod disk;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::StoredResponse;

pub use disk::DiskStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Bucket-namespaced key-value store for captured responses.
///
/// Implementations must serialize concurrent writes to the same key; writes
/// to different keys are independent. No other locking is required of
/// callers.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a bucket, creating it if absent.
    async fn open(&self, bucket: &str) -> Result<(), StoreError>;

    /// Look up a single entry.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<StoredResponse>, StoreError>;

    /// Insert or overwrite a single entry.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        response: StoredResponse,
    ) -> Result<(), StoreError>;

    /// Insert a batch of entries into one bucket.
    async fn put_all(
        &self,
        bucket: &str,
        entries: Vec<(String, StoredResponse)>,
    ) -> Result<(), StoreError>;

    /// Names of all buckets, current and stale.
    async fn bucket_names(&self) -> Result<Vec<String>, StoreError>;

    /// Delete a bucket and everything in it. Returns whether it existed.
    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError>;
}
