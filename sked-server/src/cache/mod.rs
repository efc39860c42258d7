//! Caching layer for parsed timetables.
//!
//! The cached value for a timetable is the full unfiltered event sequence;
//! week filtering happens after retrieval, so the key is derived from the
//! timetable id alone. Entries are immutable until TTL expiry, and a miss
//! always triggers a fresh upstream fetch in the loader.
//!
//! Three backends, selected by configuration: an always-missing store when
//! caching is disabled, an in-process TTL cache, and a filesystem store
//! whose entries survive restarts.

mod fs;

pub use fs::FsStore;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Event;

/// Default TTL for cached entries: 3 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(10800);

/// Errors from the cache store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {message}")]
    Io { message: String },

    #[error("cache serialization error: {message}")]
    Serialize { message: String },
}

/// Configuration for the event cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of entries held by the in-memory backend.
    pub max_capacity: u64,

    /// Directory for the filesystem backend; `None` keeps entries in memory.
    pub path: Option<PathBuf>,

    /// Disables caching entirely: every read misses, writes are dropped.
    pub disabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_capacity: 1000,
            path: None,
            disabled: false,
        }
    }
}

enum Backend {
    /// Always-empty, always-missing store.
    Disabled,
    Memory(MokaCache<String, Arc<Vec<Event>>>),
    Disk(FsStore),
}

/// TTL cache for parsed event sequences.
///
/// Explicitly constructed and handed to the loader; there is no ambient
/// process-wide cache.
pub struct EventCache {
    backend: Backend,
}

impl EventCache {
    /// Create a cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let backend = if config.disabled {
            Backend::Disabled
        } else if let Some(path) = &config.path {
            Backend::Disk(FsStore::new(path.clone(), config.ttl))
        } else {
            Backend::Memory(
                MokaCache::builder()
                    .time_to_live(config.ttl)
                    .max_capacity(config.max_capacity)
                    .build(),
            )
        };
        Self { backend }
    }

    /// Get a cached entry. Expired or unreadable entries are misses.
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Event>>> {
        match &self.backend {
            Backend::Disabled => None,
            Backend::Memory(cache) => cache.get(key).await,
            Backend::Disk(store) => store.load(key).map(Arc::new),
        }
    }

    /// Insert an entry under the configured TTL.
    pub async fn insert(&self, key: String, events: Arc<Vec<Event>>) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Disabled => Ok(()),
            Backend::Memory(cache) => {
                cache.insert(key, events).await;
                Ok(())
            }
            Backend::Disk(store) => store.save(&key, &events),
        }
    }

    /// Drop a single entry.
    pub async fn remove(&self, key: &str) {
        match &self.backend {
            Backend::Disabled => {}
            Backend::Memory(cache) => cache.invalidate(key).await,
            Backend::Disk(store) => store.remove(key),
        }
    }

    /// Drop every entry.
    pub async fn invalidate_all(&self) {
        match &self.backend {
            Backend::Disabled => {}
            Backend::Memory(cache) => cache.invalidate_all(),
            Backend::Disk(store) => store.clear(),
        }
    }
}
