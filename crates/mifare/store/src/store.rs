//! The tag store facade

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tagstore_apdu_core::{CardReader, ReaderEnumerator};
use tracing::{debug, info, instrument};

use crate::codec;
use crate::config::StoreConfig;
use crate::context::SessionContext;
use crate::discovery;
use crate::erase;
use crate::error::{Error, Result};
use crate::poller::Poller;
use crate::read;
use crate::session::{self, CardSession};
use crate::types::{EraseReport, ReadResult, WriteResult};
use crate::write;

/// Reads, writes and erases text records on MIFARE Classic 1K cards
///
/// Every operation uses the first reader the enumerator reports. Exchanges
/// with the card are serialized through the [`SessionContext`]; writes and
/// erases mark the context busy so a [`Poller`] stands back.
#[derive(Debug)]
pub struct TagStore<E: ReaderEnumerator> {
    enumerator: E,
    context: Arc<SessionContext>,
    config: StoreConfig,
}

impl<E: ReaderEnumerator> TagStore<E> {
    /// Create a store with the default configuration
    pub fn new(enumerator: E) -> Self {
        Self::with_config(enumerator, StoreConfig::default())
    }

    /// Create a store with its own context
    pub fn with_config(enumerator: E, config: StoreConfig) -> Self {
        let context = Arc::new(SessionContext::new(config.debounce_window));
        Self::with_context(enumerator, config, context)
    }

    /// Create a store sharing an existing context
    pub const fn with_context(
        enumerator: E,
        config: StoreConfig,
        context: Arc<SessionContext>,
    ) -> Self {
        Self {
            enumerator,
            context,
            config,
        }
    }

    /// Shared session state
    pub const fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    /// Store configuration
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Reader enumerator
    pub const fn enumerator(&self) -> &E {
        &self.enumerator
    }

    fn reader(&self) -> Result<E::Reader> {
        let reader = self.enumerator.first_reader()?.ok_or(Error::NoReader)?;
        debug!(reader = reader.name(), "using reader");
        Ok(reader)
    }

    fn wait_for_card(&self, reader: &mut E::Reader, timeout: Option<Duration>) -> Result<bool> {
        session::wait_for_presence(
            reader,
            timeout,
            self.config.poll_slice,
            self.context.cancellation(),
        )
    }

    /// Wait for a card and read its UID and text
    ///
    /// `None` waits without bound; `Some(ZERO)` checks once. Returns
    /// `Ok(None)` when no card arrived in time or the card was accepted less
    /// than one debounce window ago.
    #[instrument(level = "debug", skip(self))]
    pub fn read_uid_and_data(&self, timeout: Option<Duration>) -> Result<Option<ReadResult>> {
        let mut reader = self.reader()?;
        let _exchange = self.context.lock_exchange();

        if !self.wait_for_card(&mut reader, timeout)? {
            return Ok(None);
        }

        let mut session = CardSession::open(
            &mut reader,
            self.config.read_absent_timeout,
            self.config.poll_slice,
            self.context.cancellation(),
        )?;

        let uid = session.uid().clone();
        if !self.context.debounce().accept(&uid) {
            debug!(%uid, "ignoring repeated card");
            return Ok(None);
        }

        let text =
            read::extract_text(session.executor(), &self.config.keys, self.config.key_slot)?;
        info!(%uid, len = text.len(), "card read");
        Ok(Some(ReadResult { uid, text }))
    }

    /// Write `text` to the next card presented within `present_timeout`
    ///
    /// The payload is validated before waiting for a card. After the write the
    /// store waits up to `absent_timeout` for the card to be removed.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn write_text(
        &self,
        text: &str,
        present_timeout: Duration,
        absent_timeout: Duration,
    ) -> Result<WriteResult> {
        let chunks = codec::encode(text)?;
        let _busy = self.context.begin_foreground();
        let mut reader = self.reader()?;
        let _exchange = self.context.lock_exchange();

        if !self.wait_for_card(&mut reader, Some(present_timeout))? {
            return Err(Error::Timeout {
                waited: present_timeout,
            });
        }

        let mut session = CardSession::open(
            &mut reader,
            absent_timeout,
            self.config.poll_slice,
            self.context.cancellation(),
        )?;

        let plan =
            discovery::discover(session.executor(), &self.config.keys, self.config.key_slot)?;
        let blocks = write::write_chunks(session.executor(), &plan, &chunks, self.config.key_slot)?;

        let uid = session.uid().clone();
        info!(%uid, ?blocks, "payload written");
        Ok(WriteResult {
            uid,
            blocks,
            text: text.trim().to_string(),
            timestamp: SystemTime::now(),
        })
    }

    /// Erase the next card presented, waiting without bound
    pub fn erase(&self) -> Result<EraseReport> {
        self.erase_within(None)
    }

    /// Erase the next card presented within `present_timeout`
    ///
    /// Zeroes every writable block some known key opens; the report lists
    /// the blocks that were skipped. Afterwards the store waits up to the
    /// configured erase absent timeout for the card to be removed.
    #[instrument(level = "debug", skip(self))]
    pub fn erase_within(&self, present_timeout: Option<Duration>) -> Result<EraseReport> {
        let _busy = self.context.begin_foreground();
        let mut reader = self.reader()?;
        let _exchange = self.context.lock_exchange();

        if !self.wait_for_card(&mut reader, present_timeout)? {
            return Err(Error::Timeout {
                waited: present_timeout.unwrap_or_default(),
            });
        }

        let mut session = CardSession::open(
            &mut reader,
            self.config.erase_absent_timeout,
            self.config.poll_slice,
            self.context.cancellation(),
        )?;

        let outcome =
            erase::erase_blocks(session.executor(), &self.config.keys, self.config.key_slot)?;
        let uid = session.uid().clone();
        info!(%uid, erased = outcome.erased.len(), skipped = ?outcome.skipped, "card erased");
        Ok(EraseReport {
            uid,
            erased: outcome.erased,
            skipped: outcome.skipped,
        })
    }
}

impl<E> TagStore<E>
where
    E: ReaderEnumerator + 'static,
{
    /// Start a background poller reading cards every `interval`
    ///
    /// The poller skips its turn while a write or erase is running.
    pub fn poller(self: &Arc<Self>, interval: Duration) -> Poller {
        Poller::spawn(Arc::clone(self), interval)
    }
}
