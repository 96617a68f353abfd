use std::{collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::Mutex;

/// In-memory key-value map behind a single exclusive lock.
///
/// Every operation, reads included, holds the same mutex for its whole
/// duration. Clones share the underlying map.
#[derive(Clone, Debug)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Build a store pre-populated with `seed`. Later duplicates overwrite earlier ones.
    pub fn new<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self { inner: Arc::new(Mutex::new(seed.into_iter().collect())) }
    }

    /// Copy of the whole map.
    pub async fn snapshot(&self) -> HashMap<K, V> {
        let map = self.inner.lock().await;
        map.clone()
    }

    /// Insert or overwrite; returns the previous value.
    pub async fn insert(&self, key: K, value: V) -> Option<V> {
        let mut map = self.inner.lock().await;
        map.insert(key, value)
    }

    /// Remove a key; returns whether it existed.
    pub async fn remove(&self, key: &K) -> bool {
        let mut map = self.inner.lock().await;
        map.remove(key).is_some()
    }

    /// Run `f` against the map with the lock held, so multi-step
    /// check-then-act sequences are atomic.
    pub async fn with_map<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut HashMap<K, V>) -> T,
    {
        let mut map = self.inner.lock().await;
        f(&mut map)
    }
}
