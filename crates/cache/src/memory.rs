use crate::backend::{CacheBackend, CacheEnvelope};
use crate::error::{CacheError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// In-process cache holding at most `capacity` entries.
pub struct MemoryCache {
    inner: Mutex<MemCache>,
    capacity: usize,
    ttl: Option<Duration>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(MemCache::new()),
            capacity: capacity.max(1),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |cache| cache.map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemCache>> {
        self.inner.lock().map_err(|_| CacheError::Poisoned)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(256)
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, cid: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.lock()?.get(cid, self.ttl))
    }

    fn set(&self, cid: &str, data: serde_json::Value) -> Result<()> {
        self.lock()?
            .insert(cid, CacheEnvelope::new(data), self.capacity);
        Ok(())
    }

    fn invalidate(&self, cid: &str) -> Result<()> {
        self.lock()?.remove(cid);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut cache = self.lock()?;
        cache.map.clear();
        cache.order.clear();
        Ok(())
    }
}

struct MemCache {
    map: HashMap<String, CacheEnvelope>,
    order: VecDeque<String>,
}

impl MemCache {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_front(key.to_string());
    }

    fn insert(&mut self, key: &str, envelope: CacheEnvelope, capacity: usize) {
        self.map.insert(key.to_string(), envelope);
        self.touch(key);
        while self.order.len() > capacity {
            if let Some(old) = self.order.pop_back() {
                self.map.remove(&old);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    fn get(&mut self, key: &str, ttl: Option<Duration>) -> Option<serde_json::Value> {
        let envelope = self.map.get(key)?;
        if envelope.is_expired(ttl) {
            self.remove(key);
            return None;
        }
        let data = envelope.data.clone();
        self.touch(key);
        Some(data)
    }
}
