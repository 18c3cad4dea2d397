use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::Cache;

#[derive(Debug, Clone)]
struct CacheEntry {
    /// bincode encoded value
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process cache backed by a sharded `DashMap`.
///
/// Expired entries are dropped lazily on read and by a background task that
/// sweeps the map periodically. The task is aborted when the cache is dropped,
/// so the cache must be created inside a Tokio runtime.
#[derive(Debug)]
pub struct LocalCache {
    store: Arc<DashMap<String, CacheEntry>>,
    sweeper: Option<JoinHandle<()>>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::with_sweep_interval(Duration::from_secs(60))
    }

    pub fn with_sweep_interval(interval: Duration) -> Self {
        // DashMap wants a power of two greater than one.
        let shards = (num_cpus::get() * 4).next_power_of_two().max(2);
        let store = Arc::new(DashMap::with_shard_amount(shards));
        let sweeper = Self::spawn_sweeper(Arc::clone(&store), interval);

        Self {
            store,
            sweeper: Some(sweeper),
        }
    }

    fn spawn_sweeper(store: Arc<DashMap<String, CacheEntry>>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            loop {
                interval.tick().await;

                let before = store.len();
                store.retain(|_, entry| !entry.is_expired());
                let removed = before.saturating_sub(store.len());

                if removed > 0 {
                    ::tracing::debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocalCache {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl Cache for LocalCache {
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send,
    {
        if self
            .store
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            return Ok(None);
        }

        let Some(entry) = self.store.get(key) else {
            return Ok(None);
        };

        let value: V =
            bincode::deserialize(&entry.data).context("Failed to deserialize cached value")?;

        Ok(Some(value))
    }

    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let data = bincode::serialize(value).context("Failed to serialize value")?;

        self.store.insert(key.to_string(), CacheEntry::new(data, ttl));

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key);

        Ok(())
    }
}
