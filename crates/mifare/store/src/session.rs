//! Card presence waits and the scoped card session
//!
//! Presence waits are cut into short slices so a [`CancellationToken`] is
//! observed within one slice. A [`CardSession`] owns the connection to one
//! card: dropping it disconnects and then waits, bounded, for the card to
//! leave the field, on every exit path.

use std::time::{Duration, Instant};

use tagstore_apdu_core::{CardExecutor, CardReader, CardTransport, Executor};
use tracing::{debug, trace};

use crate::commands::GetUidCommand;
use crate::context::CancellationToken;
use crate::error::{Error, Result};
use crate::types::Uid;

/// Wait for a card, in slices of at most `slice`
///
/// `None` waits until a card arrives or the token fires. `Some(ZERO)` checks
/// once. Returns `Ok(false)` when the timeout elapsed without a card.
pub(crate) fn wait_for_presence<R: CardReader>(
    reader: &mut R,
    timeout: Option<Duration>,
    slice: Duration,
    cancellation: &CancellationToken,
) -> Result<bool> {
    let deadline = timeout.map(|timeout| Instant::now() + timeout);

    loop {
        if cancellation.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let wait = deadline.map_or(slice, |deadline| {
            deadline.saturating_duration_since(Instant::now()).min(slice)
        });
        if reader.wait_for_card(Some(wait))? {
            return Ok(true);
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Ok(false);
        }
    }
}

/// Wait, best effort, for the card to leave the field
///
/// Never fails: errors and cancellation end the wait early.
pub(crate) fn wait_for_absence<R: CardReader>(
    reader: &mut R,
    timeout: Duration,
    slice: Duration,
    cancellation: &CancellationToken,
) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        if cancellation.is_cancelled() {
            return false;
        }

        let wait = deadline.saturating_duration_since(Instant::now()).min(slice);
        match reader.wait_for_removal(wait) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => {
                debug!(error = %e, "removal wait failed");
                return false;
            }
        }

        if Instant::now() >= deadline {
            trace!(reader = reader.name(), "card still present after removal wait");
            return false;
        }
    }
}

/// A live connection to the card in one reader
///
/// Dropping the session disconnects from the card and waits up to the
/// absent timeout for it to be removed.
#[derive(Debug)]
pub struct CardSession<'a, R: CardReader> {
    reader: &'a mut R,
    executor: CardExecutor<R::Transport>,
    uid: Uid,
    absent_timeout: Duration,
    slice: Duration,
    cancellation: &'a CancellationToken,
}

impl<'a, R: CardReader> CardSession<'a, R> {
    /// Connect to the card in `reader` and read its UID
    pub(crate) fn open(
        reader: &'a mut R,
        absent_timeout: Duration,
        slice: Duration,
        cancellation: &'a CancellationToken,
    ) -> Result<Self> {
        let transport = reader.connect()?;
        let mut session = Self {
            reader,
            executor: CardExecutor::new(transport),
            uid: Uid::default(),
            absent_timeout,
            slice,
            cancellation,
        };

        session.uid = session.executor.execute(&GetUidCommand)?;
        debug!(reader = session.reader.name(), uid = %session.uid, "card session opened");
        Ok(session)
    }

    /// UID of the connected card
    pub const fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Executor for commands to the connected card
    pub fn executor(&mut self) -> &mut CardExecutor<R::Transport> {
        &mut self.executor
    }
}

impl<R: CardReader> Drop for CardSession<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.executor.transport_mut().disconnect() {
            debug!(error = %e, "disconnect failed");
        }

        if self.absent_timeout.is_zero() {
            return;
        }
        let removed = wait_for_absence(
            self.reader,
            self.absent_timeout,
            self.slice,
            self.cancellation,
        );
        trace!(removed, "card session closed");
    }
}
