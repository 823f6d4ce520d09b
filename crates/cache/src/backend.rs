use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Storage for serialized blobs keyed by string cache ids.
///
/// Concurrent writers of the same id are last-writer-wins.
pub trait CacheBackend: Send + Sync {
    fn get(&self, cid: &str) -> Result<Option<serde_json::Value>>;

    fn set(&self, cid: &str, data: serde_json::Value) -> Result<()>;

    fn invalidate(&self, cid: &str) -> Result<()>;

    /// Drop every entry.
    fn clear(&self) -> Result<()>;
}

/// Load and decode an entry. Entries that no longer decode are misses.
pub fn load<T: DeserializeOwned>(backend: &dyn CacheBackend, cid: &str) -> Result<Option<T>> {
    let Some(raw) = backend.get(cid)? else {
        log::debug!("Cache miss {cid}");
        return Ok(None);
    };
    match serde_json::from_value(raw) {
        Ok(data) => {
            log::debug!("Cache hit {cid}");
            Ok(Some(data))
        }
        Err(err) => {
            log::warn!("Cache entry {cid} corrupted: {err}");
            backend.invalidate(cid)?;
            Ok(None)
        }
    }
}

pub fn store<T: Serialize>(backend: &dyn CacheBackend, cid: &str, data: &T) -> Result<()> {
    backend.set(cid, serde_json::to_value(data)?)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct CacheEnvelope {
    pub created_ms: u64,
    pub data: serde_json::Value,
}

impl CacheEnvelope {
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            created_ms: unix_ms_now(),
            data,
        }
    }

    pub fn is_expired(&self, ttl: Option<Duration>) -> bool {
        let Some(ttl) = ttl else {
            return false;
        };
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        unix_ms_now().saturating_sub(self.created_ms) > ttl_ms
    }
}

pub(crate) fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
