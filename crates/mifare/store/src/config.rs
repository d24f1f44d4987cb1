//! Store configuration

use std::time::Duration;

use crate::constants::{
    DEFAULT_DEBOUNCE_WINDOW, DEFAULT_ERASE_ABSENT_TIMEOUT, DEFAULT_KEY_SLOT, DEFAULT_KEYS,
    DEFAULT_POLL_SLICE, DEFAULT_READ_ABSENT_TIMEOUT,
};
use crate::types::Key;

/// Tunables for a [`crate::TagStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Candidate keys, in the order they are tried
    pub keys: Vec<Key>,
    /// Reader key slot used for LOAD KEYS and GENERAL AUTHENTICATE
    pub key_slot: u8,
    /// Length of each presence wait slice
    pub poll_slice: Duration,
    /// Window during which a repeated UID is ignored by reads
    pub debounce_window: Duration,
    /// How long a read waits for the card to leave before returning
    pub read_absent_timeout: Duration,
    /// How long an erase waits for the card to leave before returning
    pub erase_absent_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_KEYS.to_vec(),
            key_slot: DEFAULT_KEY_SLOT,
            poll_slice: DEFAULT_POLL_SLICE,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            read_absent_timeout: DEFAULT_READ_ABSENT_TIMEOUT,
            erase_absent_timeout: DEFAULT_ERASE_ABSENT_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Replace the candidate keys
    pub fn with_keys(mut self, keys: impl Into<Vec<Key>>) -> Self {
        self.keys = keys.into();
        self
    }

    /// Try `key` before the configured keys
    pub fn with_preferred_key(mut self, key: Key) -> Self {
        self.keys.retain(|k| *k != key);
        self.keys.insert(0, key);
        self
    }

    /// Use a different reader key slot
    pub fn with_key_slot(mut self, slot: u8) -> Self {
        self.key_slot = slot;
        self
    }

    /// Set the presence wait slice
    pub fn with_poll_slice(mut self, slice: Duration) -> Self {
        self.poll_slice = slice;
        self
    }

    /// Set the debounce window
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    /// Set the post-read removal wait
    pub fn with_read_absent_timeout(mut self, timeout: Duration) -> Self {
        self.read_absent_timeout = timeout;
        self
    }

    /// Set the post-erase removal wait
    pub fn with_erase_absent_timeout(mut self, timeout: Duration) -> Self {
        self.erase_absent_timeout = timeout;
        self
    }
}
