pub mod local;

pub use local::LocalCache;

use std::fmt::{Debug, Display};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Key/value store with per-entry expiry.
///
/// Values are serialized on the way in, so anything `Serialize` can be cached
/// regardless of the backend.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// `None` when the key is missing or expired.
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send;

    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// Builder for consistent cache key naming
pub struct CacheKey;

impl CacheKey {
    pub fn session(id: impl Display) -> String {
        format!("session:{id}")
    }
}
