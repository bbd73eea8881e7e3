//! Filesystem-backed cache store.
//!
//! Layout: one directory per bucket under a root directory, one
//! pretty-printed JSON file per entry. Entry file names are derived from
//! the cache key; bucket names are used verbatim as directory names and
//! must be valid path segments (version strings like `app-cache-v3` are).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::models::StoredResponse;

use super::{CacheStore, StoreError};

/// Directory name under the user cache dir used by `open_default`.
const APP_DIR: &str = "shellcache";

pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at the given directory, creating it if needed.
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Create a store under the user's cache directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let cache_dir = dirs::cache_dir().ok_or_else(|| {
            StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not find cache directory",
            ))
        })?;
        Self::new(cache_dir.join(APP_DIR))
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    fn entry_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.bucket_dir(bucket).join(format!("{}.json", file_stem(key)))
    }

    fn write_entry(&self, bucket: &str, key: &str, response: &StoredResponse) -> Result<(), StoreError> {
        let path = self.entry_path(bucket, key);
        let contents = serde_json::to_string_pretty(response)?;
        std::fs::write(&path, contents)?;
        debug!(bucket, key, path = %path.display(), "stored entry");
        Ok(())
    }
}

/// Derive a file name from a cache key: a readable prefix plus a hash to
/// disambiguate keys that sanitize identically. The hash only
/// disambiguates; if it ever changed across toolchains the result would be
/// a cache miss, not corruption.
fn file_stem(key: &str) -> String {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let digest = hasher.finish();

    let prefix: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(48)
        .collect();
    format!("{}-{:016x}", prefix, digest)
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn open(&self, bucket: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.bucket_dir(bucket))?;
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<StoredResponse>, StoreError> {
        let path = self.entry_path(bucket, key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        response: StoredResponse,
    ) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.bucket_dir(bucket))?;
        self.write_entry(bucket, key, &response)
    }

    async fn put_all(
        &self,
        bucket: &str,
        entries: Vec<(String, StoredResponse)>,
    ) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.bucket_dir(bucket))?;
        for (key, response) in &entries {
            self.write_entry(bucket, key, response)?;
        }
        Ok(())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError> {
        let dir = self.bucket_dir(bucket);
        if !dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&dir)?;
        debug!(bucket, "deleted bucket");
        Ok(true)
    }
}
