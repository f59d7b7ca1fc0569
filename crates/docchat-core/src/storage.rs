//! Storage abstraction for the simulation fixtures.
//!
//! The demo's user, chat, and file stores all sit behind this interface so a
//! real implementation can swap in a persistent store without changing
//! callers. There is exactly one store instance per concern, shared by every
//! route that touches it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A keyed store with the four operations the demo needs.
#[async_trait]
pub trait Storage<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: V);

    /// Removes the value under `key`. Returns true if something was removed.
    async fn delete(&self, key: &str) -> bool;

    /// Returns all entries, in no particular order.
    async fn list(&self) -> Vec<(String, V)>;
}

/// In-memory `Storage` implementation backing the simulation endpoints.
#[derive(Debug)]
pub struct MemoryStorage<V> {
    entries: Arc<RwLock<HashMap<String, V>>>,
}

impl<V> Default for MemoryStorage<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<V> Clone for MemoryStorage<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V> MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutates the value under `key` in place, inserting a default first if
    /// absent. The whole read-modify-write runs under one lock acquisition.
    pub async fn update<F>(&self, key: &str, f: F)
    where
        V: Default,
        F: FnOnce(&mut V) + Send,
    {
        let mut entries = self.entries.write().await;
        f(entries.entry(key.to_string()).or_default());
    }
}

#[async_trait]
impl<V> Storage<V> for MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: &str, value: V) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    async fn list(&self) -> Vec<(String, V)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
