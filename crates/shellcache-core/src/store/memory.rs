//! In-process cache store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::StoredResponse;

use super::{CacheStore, StoreError};

type Bucket = HashMap<String, StoredResponse>;

/// Cache store held entirely in memory.
///
/// The lock serializes same-key writes; lookups share read access.
#[derive(Default)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, Bucket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a bucket, if it exists.
    pub async fn len(&self, bucket: &str) -> Option<usize> {
        self.buckets.read().await.get(bucket).map(|b| b.len())
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, bucket: &str) -> Result<(), StoreError> {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<StoredResponse>, StoreError> {
        Ok(self
            .buckets
            .read()
            .await
            .get(bucket)
            .and_then(|b| b.get(key))
            .cloned())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        response: StoredResponse,
    ) -> Result<(), StoreError> {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), response);
        Ok(())
    }

    async fn put_all(
        &self,
        bucket: &str,
        entries: Vec<(String, StoredResponse)>,
    ) -> Result<(), StoreError> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(bucket.to_string()).or_default();
        for (key, response) in entries {
            bucket.insert(key, response);
        }
        Ok(())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError> {
        Ok(self.buckets.write().await.remove(bucket).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetworkResponse;

    fn stored(body: &[u8]) -> StoredResponse {
        NetworkResponse::new(200, body.to_vec()).into_stored()
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::new();
        store.open("v1").await.unwrap();
        store
            .put("v1", "GET https://app.example/index.html", stored(b"shell"))
            .await
            .unwrap();

        let hit = store
            .get("v1", "GET https://app.example/index.html")
            .await
            .unwrap();
        assert_eq!(hit.unwrap().body, b"shell".to_vec());

        let miss = store.get("v1", "GET https://app.example/other").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_get_from_missing_bucket() {
        let store = MemoryStore::new();
        let miss = store.get("nope", "GET https://app.example/").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_put_all_batch() {
        let store = MemoryStore::new();
        store
            .put_all(
                "v1",
                vec![
                    ("a".to_string(), stored(b"1")),
                    ("b".to_string(), stored(b"2")),
                    ("c".to_string(), stored(b"3")),
                ],
            )
            .await
            .unwrap();
        assert_eq!(store.len("v1").await, Some(3));
    }

    #[tokio::test]
    async fn test_overwrite_same_key() {
        let store = MemoryStore::new();
        store.put("v1", "k", stored(b"old")).await.unwrap();
        store.put("v1", "k", stored(b"new")).await.unwrap();
        assert_eq!(store.len("v1").await, Some(1));
        let entry = store.get("v1", "k").await.unwrap().unwrap();
        assert_eq!(entry.body, b"new".to_vec());
    }

    #[tokio::test]
    async fn test_bucket_names_and_delete() {
        let store = MemoryStore::new();
        store.open("cache-v1").await.unwrap();
        store.open("cache-v2").await.unwrap();

        let mut names = store.bucket_names().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["cache-v1", "cache-v2"]);

        assert!(store.delete_bucket("cache-v1").await.unwrap());
        assert!(!store.delete_bucket("cache-v1").await.unwrap());
        assert_eq!(store.bucket_names().await.unwrap(), vec!["cache-v2"]);
    }
}
