//! Keyed result cache with in-flight coalescing.
//!
//! Each key owns a [`tokio::sync::OnceCell`]. Callers asking for the same key
//! while a fetch is running wait on that fetch instead of starting another
//! one; once it succeeds the value is reused for the rest of the session.
//! Failures are not stored.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;

type Cell<V> = Arc<OnceCell<Arc<V>>>;

#[derive(Debug)]
pub struct QueryCache<K, V> {
    cells: Mutex<HashMap<K, Cell<V>>>,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn cells(&self) -> MutexGuard<'_, HashMap<K, Cell<V>>> {
        // the map is only touched in short non-panicking sections
        self.cells.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cell(&self, key: &K) -> Cell<V> {
        self.cells().entry(key.clone()).or_default().clone()
    }

    /// Returns the cached value for `key`, running `fetch` only if no value is
    /// stored and no other caller is already fetching it.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.cell(key);
        if let Some(value) = cell.get() {
            tracing::trace!("query cache hit");
            return Ok(value.clone());
        }

        cell.get_or_try_init(move || async move { fetch().await.map(Arc::new) })
            .await
            .cloned()
    }

    /// Value already stored for `key`, without fetching.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.cells().get(key).and_then(|cell| cell.get().cloned())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Drops every stored value. Fetches already running keep their own cell.
    pub fn clear(&self) {
        self.cells().clear();
    }

    pub fn len(&self) -> usize {
        self.cells()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
