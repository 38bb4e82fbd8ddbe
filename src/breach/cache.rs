//! TTL cache of range responses keyed by hash prefix.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use super::{BreachLookup, HashPrefix, RangeEntry};
use crate::config::BreachConfig;
use crate::error::LookupError;

struct CacheEntry {
    stored_at: Instant,
    entries: Arc<Vec<RangeEntry>>,
}

/// Wraps a [`BreachLookup`] and remembers successful responses per prefix.
///
/// Entries expire after `ttl`, since breach corpora keep growing. At most
/// `capacity` prefixes are held; expired entries are evicted first, then the
/// oldest one. Failed lookups are never cached.
pub struct CachedLookup<L> {
    inner: L,
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<HashPrefix, CacheEntry>>,
}

impl<L: BreachLookup> CachedLookup<L> {
    pub fn new(inner: L, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            ttl,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(inner: L, config: &BreachConfig) -> Self {
        Self::new(inner, config.cache_ttl, config.cache_capacity)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, prefix: &HashPrefix) -> Option<Arc<Vec<RangeEntry>>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(prefix) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.entries.clone()),
            Some(_) => {
                entries.remove(prefix);
                None
            }
            None => None,
        }
    }

    fn insert(&self, prefix: HashPrefix, value: Arc<Vec<RangeEntry>>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.capacity && !entries.contains_key(&prefix) {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        }
        if entries.len() >= self.capacity && !entries.contains_key(&prefix) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            prefix,
            CacheEntry {
                stored_at: Instant::now(),
                entries: value,
            },
        );
    }
}

impl<L: BreachLookup + Sync> BreachLookup for CachedLookup<L> {
    async fn query(&self, prefix: &HashPrefix) -> Result<Vec<RangeEntry>, LookupError> {
        if let Some(hit) = self.get(prefix) {
            #[cfg(feature = "tracing")]
            tracing::debug!(prefix = %prefix, "breach range cache hit");
            return Ok(hit.as_ref().clone());
        }

        let fetched = self.inner.query(prefix).await?;
        self.insert(prefix.clone(), Arc::new(fetched.clone()));
        Ok(fetched)
    }
}
