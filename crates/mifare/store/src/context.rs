//! State shared by every operation of a store
//!
//! Held behind an `Arc` so the poller thread and foreground callers see the
//! same busy flag, debounce table and cancellation signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use crate::debounce::DebounceCache;

/// Cooperative cancellation flag for presence waits
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create an untriggered token
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal every holder of this token
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether [`CancellationToken::cancel`] was called since the last reset
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Re-arm the token
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Busy flag, debounce table, cancellation and the card exchange lock
#[derive(Debug)]
pub struct SessionContext {
    foreground: AtomicUsize,
    debounce: DebounceCache,
    cancellation: CancellationToken,
    exchange: Mutex<()>,
}

impl SessionContext {
    /// Create a context with the given debounce window
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            foreground: AtomicUsize::new(0),
            debounce: DebounceCache::new(debounce_window),
            cancellation: CancellationToken::new(),
            exchange: Mutex::new(()),
        }
    }

    /// Whether a foreground write or erase is running
    pub fn is_busy(&self) -> bool {
        self.foreground.load(Ordering::SeqCst) > 0
    }

    /// Mark a foreground operation; busy until the guard drops
    pub fn begin_foreground(&self) -> BusyGuard<'_> {
        let running = self.foreground.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(running, "foreground operation started");
        BusyGuard {
            counter: &self.foreground,
        }
    }

    /// Debounce table for reads
    pub const fn debounce(&self) -> &DebounceCache {
        &self.debounce
    }

    /// Cancellation signal observed by every presence wait
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Serialize exchanges with the reader
    pub(crate) fn lock_exchange(&self) -> MutexGuard<'_, ()> {
        self.exchange.lock()
    }
}

/// Keeps [`SessionContext::is_busy`] true while alive
#[derive(Debug)]
pub struct BusyGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_guard_nesting() {
        let context = SessionContext::new(Duration::ZERO);
        assert!(!context.is_busy());

        let outer = context.begin_foreground();
        let inner = context.begin_foreground();
        drop(outer);
        assert!(context.is_busy());
        drop(inner);
        assert!(!context.is_busy());
    }

    #[test]
    fn test_cancellation_is_shared() {
        let context = SessionContext::new(Duration::ZERO);
        let token = context.cancellation().clone();

        token.cancel();
        assert!(context.cancellation().is_cancelled());
        context.cancellation().reset();
        assert!(!token.is_cancelled());
    }
}
