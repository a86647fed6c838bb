// src/cache.rs
use crate::core::types::{OriginLabel, Resolution};
use crate::error::PersistenceError;
use crate::persistence::{load_from_disk, save_to_disk, CacheSnapshot};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Case-insensitive word → resolution memo, valid for one calendar day.
///
/// The cache is shared by every in-flight resolution of a batch. Writes are
/// idempotent, so concurrent writers settle on last-write-wins.
pub struct OriginCache {
    state: Mutex<CacheState>,
    path: Option<PathBuf>,
}

#[derive(Default)]
struct CacheState {
    snapshot: CacheSnapshot,
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub date: Option<NaiveDate>,
    /// Length of the entries serialized as JSON.
    pub size_bytes: usize,
}

impl OriginCache {
    pub fn in_memory() -> Self {
        Self::from_snapshot(CacheSnapshot::default(), None)
    }

    pub fn from_snapshot(snapshot: CacheSnapshot, path: Option<PathBuf>) -> Self {
        Self {
            state: Mutex::new(CacheState { snapshot, dirty: false }),
            path,
        }
    }

    /// Loads the persisted cache, treating a missing or corrupted file as empty,
    /// and rolls it over if it belongs to an earlier day.
    pub fn load(path: &Path, today: NaiveDate) -> Self {
        let snapshot = match load_from_disk(path) {
            Ok(snapshot) => snapshot,
            Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cache file yet");
                CacheSnapshot::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable cache");
                CacheSnapshot::default()
            }
        };
        let cache = Self::from_snapshot(snapshot, Some(path.to_path_buf()));
        cache.rollover_if_stale(today);
        cache
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, word: &str) -> Option<Resolution> {
        self.lock().snapshot.entries.get(&word.to_lowercase()).cloned()
    }

    /// The cached label, for words that resolved to a single origin.
    pub fn get_label(&self, word: &str) -> Option<OriginLabel> {
        self.get(word).and_then(|resolution| resolution.label())
    }

    pub fn set(&self, word: &str, resolution: Resolution) {
        let mut state = self.lock();
        state.snapshot.entries.insert(word.to_lowercase(), resolution);
        state.dirty = true;
    }

    pub fn has(&self, word: &str) -> bool {
        self.lock().snapshot.entries.contains_key(&word.to_lowercase())
    }

    /// Drops every entry and forgets the active date.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.snapshot = CacheSnapshot::default();
        state.dirty = true;
    }

    /// Wipes the cache when its recorded day differs from `today`, then records
    /// `today`. Returns whether entries were wiped.
    pub fn rollover_if_stale(&self, today: NaiveDate) -> bool {
        let mut state = self.lock();
        let stale = matches!(state.snapshot.last_active, Some(day) if day != today);
        if stale {
            info!(
                previous = ?state.snapshot.last_active,
                dropped = state.snapshot.entries.len(),
                "origin cache rolled over"
            );
            state.snapshot.entries.clear();
        }
        if state.snapshot.last_active != Some(today) {
            state.snapshot.last_active = Some(today);
            state.dirty = true;
        }
        stale
    }

    pub fn last_active(&self) -> Option<NaiveDate> {
        self.lock().snapshot.last_active
    }

    pub fn len(&self) -> usize {
        self.lock().snapshot.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.snapshot.entries.len(),
            date: state.snapshot.last_active,
            size_bytes: serde_json::to_string(&state.snapshot.entries)
                .map(|json| json.len())
                .unwrap_or(0),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persists the cache if it changed since the last save. In-memory caches
    /// are never written.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot = {
            let mut state = self.lock();
            if !state.dirty {
                return Ok(());
            }
            state.dirty = false;
            state.snapshot.clone()
        };
        if let Err(e) = save_to_disk(&snapshot, path) {
            self.lock().dirty = true;
            return Err(e);
        }
        debug!(path = %path.display(), entries = snapshot.entries.len(), "origin cache saved");
        Ok(())
    }
}
