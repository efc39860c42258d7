//! Filesystem-backed cache store.
//!
//! Entries are JSON files sharded into subdirectories by key hash, each
//! carrying an absolute expiry timestamp. Expired or unreadable entries
//! behave as misses and are removed on sight; write failures propagate.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::Event;

use super::CacheError;

/// One persisted cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct FsEntry {
    /// Unix timestamp at and past which the entry is stale.
    expires_at_secs: u64,
    events: Vec<Event>,
}

/// Disk store for parsed event sequences.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    ttl: Duration,
}

impl FsStore {
    pub fn new(root: PathBuf, ttl: Duration) -> Self {
        Self { root, ttl }
    }

    /// Entry file for a key: `<root>/<shard>/<key>.json`, where the shard is
    /// one byte of the key hash. Keys are sanitized to filesystem-safe names.
    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let shard = format!("{:02x}", hasher.finish() as u8);

        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();

        self.root.join(shard).join(format!("{name}.json"))
    }

    /// Load an entry. Missing, unreadable and expired entries are `None`.
    pub fn load(&self, key: &str) -> Option<Vec<Event>> {
        let path = self.entry_path(key);
        let contents = std::fs::read_to_string(&path).ok()?;
        let entry: FsEntry = serde_json::from_str(&contents).ok()?;

        if unix_now() >= entry.expires_at_secs {
            let _ = std::fs::remove_file(&path);
            return None;
        }

        Some(entry.events)
    }

    /// Persist an entry under the store TTL, creating shard directories as
    /// needed.
    pub fn save(&self, key: &str, events: &[Event]) -> Result<(), CacheError> {
        let path = self.entry_path(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                message: format!("failed to create shard directory: {e}"),
            })?;
        }

        let entry = FsEntry {
            expires_at_secs: unix_now().saturating_add(self.ttl.as_secs()),
            events: events.to_vec(),
        };
        let json = serde_json::to_string(&entry).map_err(|e| CacheError::Serialize {
            message: e.to_string(),
        })?;

        std::fs::write(&path, json).map_err(|e| CacheError::Io {
            message: format!("failed to write cache entry: {e}"),
        })
    }

    /// Drop a single entry, if present.
    pub fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.entry_path(key));
    }

    /// Drop the whole store.
    pub fn clear(&self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
