//! Avatar cache with LRU eviction.
//!
//! Decoded avatars are shared by every screen, so the cache lives behind an
//! `Arc` and locks internally. Entries never change once inserted; the only
//! way one goes away is capacity eviction.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use image::DynamicImage;
use parking_lot::Mutex;

/// Default number of decoded avatars kept in memory
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// A decoded avatar, cheap to hand out to several rows at once
pub type AvatarImage = Arc<DynamicImage>;

#[derive(Debug, Default)]
struct CacheInner {
    /// Map from resource id to decoded image
    entries: HashMap<String, AvatarImage>,
    /// LRU order (front = oldest, back = most recent)
    lru_order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl CacheInner {
    fn touch(&mut self, resource: &str) {
        self.lru_order.retain(|r| r != resource);
        self.lru_order.push_back(resource.to_string());
    }
}

/// Thread-safe avatar cache with LRU eviction
#[derive(Debug)]
pub struct AvatarCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
}

impl AvatarCache {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_entries),
                lru_order: VecDeque::with_capacity(max_entries),
                ..CacheInner::default()
            }),
            max_entries,
        }
    }

    /// Get a cached avatar, counting the hit or miss
    pub fn get(&self, resource: &str) -> Option<AvatarImage> {
        let mut inner = self.inner.lock();
        match inner.entries.get(resource).cloned() {
            Some(image) => {
                inner.hits += 1;
                inner.touch(resource);
                Some(image)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Check if a resource is cached (without updating LRU or stats)
    #[cfg(test)]
    pub fn contains(&self, resource: &str) -> bool {
        self.inner.lock().entries.contains_key(resource)
    }

    /// Insert a decoded avatar. An existing entry is kept as is and only
    /// marked as recently used.
    pub fn insert(&self, resource: &str, image: AvatarImage) {
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(resource) {
            inner.touch(resource);
            return;
        }

        while inner.entries.len() >= self.max_entries {
            let Some(oldest) = inner.lru_order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            log::debug!("Evicted avatar cache entry: {oldest}");
        }

        inner.lru_order.push_back(resource.to_string());
        inner.entries.insert(resource.to_string(), image);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// (hits, misses, entries)
    pub fn stats(&self) -> (u64, u64, usize) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses, inner.entries.len())
    }

    pub fn log_stats(&self) {
        let (hits, misses, entries) = self.stats();
        let total = hits + misses;
        if total > 0 {
            let hit_rate = (hits as f64 / total as f64) * 100.0;
            log::debug!(
                "Avatar cache: {hits} hits, {misses} misses ({hit_rate:.1}% hit rate), {entries}/{} entries",
                self.capacity()
            );
        }
    }
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

/// Cache shared between every screen of the process
pub type SharedAvatarCache = Arc<AvatarCache>;

pub fn new_shared_cache(max_entries: usize) -> SharedAvatarCache {
    Arc::new(AvatarCache::new(max_entries))
}
