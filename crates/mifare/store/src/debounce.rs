//! Per-UID debounce table

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::types::Uid;

/// Remembers when each UID was last accepted
///
/// A UID is rejected while it was accepted less than `window` ago. Rejected
/// presentations do not refresh the timestamp.
#[derive(Debug)]
pub struct DebounceCache {
    window: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl DebounceCache {
    /// Create an empty cache
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Debounce window
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Accept `uid` now unless it was accepted within the window
    pub fn accept(&self, uid: &Uid) -> bool {
        self.accept_at(uid, Instant::now())
    }

    /// [`DebounceCache::accept`] at an explicit instant
    pub fn accept_at(&self, uid: &Uid, now: Instant) -> bool {
        let key = uid.to_hex();
        let mut seen = self.seen.lock();
        if seen
            .get(&key)
            .is_some_and(|last| now.saturating_duration_since(*last) < self.window)
        {
            return false;
        }
        seen.insert(key, now);
        true
    }

    /// Whether `uid` would be rejected right now
    pub fn is_debounced(&self, uid: &Uid) -> bool {
        let now = Instant::now();
        self.seen
            .lock()
            .get(&uid.to_hex())
            .is_some_and(|last| now.saturating_duration_since(*last) < self.window)
    }

    /// Drop entries older than the window; returns how many were removed
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// [`DebounceCache::sweep`] at an explicit instant
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut seen = self.seen.lock();
        let before = seen.len();
        seen.retain(|_, last| now.saturating_duration_since(*last) < self.window);
        before - seen.len()
    }

    /// Forget every UID
    pub fn clear(&self) {
        self.seen.lock().clear();
    }

    /// Number of UIDs remembered
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    /// Whether no UID is remembered
    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}
