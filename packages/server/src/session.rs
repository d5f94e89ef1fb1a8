use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use lru::LruCache;
use podium_common::ContestSelection;
use uuid::Uuid;

struct SessionEntry {
    selection: ContestSelection,
    expires_at: DateTime<Utc>,
}

/// Contest selections keyed by session id.
///
/// An entry is created on the first state change of a session and dropped
/// when its token has expired or when the least recently used entry is
/// evicted to make room. Nothing is persisted.
pub struct SessionStore {
    entries: Mutex<LruCache<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Current selection of a session; the default selection if the session
    /// has none or it has expired.
    pub fn get(&self, session_id: Uuid, now: DateTime<Utc>) -> ContestSelection {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let live = entries
            .get(&session_id)
            .map(|entry| (entry.selection, entry.expires_at > now));
        match live {
            Some((selection, true)) => selection,
            Some((_, false)) => {
                entries.pop(&session_id);
                ContestSelection::new()
            }
            None => ContestSelection::new(),
        }
    }

    /// Apply `f` to the session's selection, creating it if needed, and
    /// return the result.
    pub fn update<F>(
        &self,
        session_id: Uuid,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
        f: F,
    ) -> ContestSelection
    where
        F: FnOnce(&mut ContestSelection),
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut selection = match entries.pop(&session_id) {
            Some(entry) if entry.expires_at > now => entry.selection,
            _ => ContestSelection::new(),
        };
        f(&mut selection);
        entries.put(
            session_id,
            SessionEntry {
                selection,
                expires_at,
            },
        );
        selection
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
