//! Background card polling

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};
use tagstore_apdu_core::ReaderEnumerator;
use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::store::TagStore;
use crate::types::ReadResult;

/// Reads cards on a background thread and publishes every accepted read
///
/// Stops when dropped, when [`Poller::stop`] is called, when the store's
/// cancellation token fires, or when every receiver is gone.
#[derive(Debug)]
pub struct Poller {
    running: Arc<AtomicBool>,
    receiver: Receiver<ReadResult>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub(crate) fn spawn<E>(store: Arc<TagStore<E>>, interval: Duration) -> Self
    where
        E: ReaderEnumerator + 'static,
    {
        let (sender, receiver) = unbounded();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::spawn(move || {
            debug!(?interval, "poller started");
            while flag.load(Ordering::SeqCst) {
                let context = store.context();
                if context.cancellation().is_cancelled() {
                    break;
                }
                if context.is_busy() {
                    trace!("foreground operation running, skipping poll");
                    thread::sleep(interval);
                    continue;
                }

                match store.read_uid_and_data(Some(interval)) {
                    Ok(Some(result)) => {
                        if sender.send(result).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(Error::Cancelled) => break,
                    Err(Error::NoReader) => {
                        trace!("no reader attached");
                        thread::sleep(interval);
                    }
                    Err(e) => {
                        warn!(error = %e, "poll failed");
                        thread::sleep(interval);
                    }
                }
            }
            debug!("poller stopped");
        });

        Self {
            running,
            receiver,
            handle: Some(handle),
        }
    }

    /// Channel of accepted reads
    pub const fn receiver(&self) -> &Receiver<ReadResult> {
        &self.receiver
    }

    /// Whether the polling thread is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop polling and wait for the thread to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("poller thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
