//! In-memory TTL cache for resolved vehicle images.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::entities::{LookupKey, ResolvedImage};

/// Default cache entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    value: ResolvedImage,
    stored_at: Instant,
}

/// In-memory cache keyed by [`LookupKey`], with time-bounded entries.
///
/// Entries are evicted lazily: an entry aged at least the TTL is removed on
/// the access that observes it, never by a background sweep. Thread-safe;
/// callers always receive a clone of the stored value.
pub struct TtlImageCache {
    entries: RwLock<HashMap<LookupKey, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TtlImageCache {
    /// Creates a cache with the given entry lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache with the default one-hour lifetime.
    #[must_use]
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Looks up a fresh entry, evicting it first if it has expired.
    ///
    /// An entry whose age is greater than or equal to the TTL is treated as
    /// absent.
    pub async fn get(&self, key: &LookupKey) -> Option<ResolvedImage> {
        let mut entries = self.entries.write().await;

        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.stored_at.elapsed() >= self.ttl);
        if expired {
            entries.remove(key);
            debug!(%key, "Evicted expired cache entry");
        }

        if let Some(entry) = entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%key, "Image cache hit");
            Some(entry.value.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(%key, "Image cache miss");
            None
        }
    }

    /// Inserts or overwrites an entry, resetting its age. Last write wins.
    pub async fn put(&self, key: LookupKey, value: ResolvedImage) {
        let mut entries = self.entries.write().await;
        debug!(%key, "Storing resolved image in cache");
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Removes a single entry regardless of age.
    pub async fn invalidate(&self, key: &LookupKey) {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            debug!(%key, "Invalidated cache entry");
        }
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        debug!("Cleared image cache");
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        // Best-effort under concurrent writers
        self.entries.try_read().map_or(0, |entries| entries.len())
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns hit/miss statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for TtlImageCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

/// Statistics about cache effectiveness.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached entries.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}
