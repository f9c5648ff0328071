//! In-process store backed by a concurrent map.
//!
//! Used in tests and for single-instance deployments where no fleet-wide
//! consistency is needed.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{self, BoxFuture, FutureExt};

use crate::store::{advance_counter, KvStore, StoreResult};

/// A thread-safe in-memory key-value store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        future::ready(Ok(())).boxed()
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<Option<String>>> {
        let value = self.inner.get(key).map(|r| r.value().clone());
        future::ready(Ok(value)).boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        self.inner.insert(key.to_string(), value.to_string());
        future::ready(Ok(())).boxed()
    }

    fn increment<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<i64>> {
        // The entry guard holds the shard lock for the whole read-modify-write.
        let result = match self.inner.entry(key.to_string()) {
            Entry::Occupied(mut entry) => advance_counter(Some(entry.get().as_str())).map(|next| {
                entry.insert(next.to_string());
                next
            }),
            Entry::Vacant(entry) => advance_counter(None).map(|next| {
                entry.insert(next.to_string());
                next
            }),
        };
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[tokio::test]
    async fn test_get_set() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_degrades_to_one() {
        let store = MemoryStore::new();
        assert_eq!(store.increment("counter").await.unwrap(), 2);
        assert_eq!(store.increment("counter").await.unwrap(), 3);

        store.set("counter", "garbage").await.unwrap();
        assert_eq!(store.increment("counter").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment("counter").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.get("counter").await.unwrap().as_deref(), Some("51"));
    }

    #[tokio::test]
    async fn test_increment_rejects_signed_and_exponent_values() {
        let store = MemoryStore::new();
        for raw in ["+5", "1e2", "0x10", "0"] {
            store.set("counter", raw).await.unwrap();
            assert_eq!(store.increment("counter").await.unwrap(), 2, "value {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_increment_at_ceiling_leaves_value() {
        let store = MemoryStore::new();
        let max = i64::MAX.to_string();
        store.set("counter", &max).await.unwrap();

        let err = store.increment("counter").await.unwrap_err();
        assert!(matches!(err, StoreError::Command(_)));
        assert_eq!(store.get("counter").await.unwrap(), Some(max));
    }
}
