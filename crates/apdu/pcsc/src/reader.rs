//! Reader representation for PC/SC devices

use std::ffi::CString;
use std::fmt;
use std::time::Duration;

use pcsc::{Context, ReaderState, State};
use tagstore_apdu_core::{CardReader, TransportError};
use tracing::trace;

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::transport::PcscTransport;

/// Snapshot of a PC/SC card reader
#[derive(Debug, Clone)]
pub struct PcscReader {
    /// Name of the reader
    name: String,

    /// Whether a card is present
    has_card: bool,

    /// Answer To Reset of the card (if present)
    atr: Option<Vec<u8>>,
}

impl PcscReader {
    /// Create a new reader
    pub const fn new(name: String, has_card: bool, atr: Option<Vec<u8>>) -> Self {
        Self {
            name,
            has_card,
            atr,
        }
    }

    /// Get the reader name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a card is present in the reader
    pub const fn has_card(&self) -> bool {
        self.has_card
    }

    /// Get the ATR of the card if present
    pub fn atr(&self) -> Option<&[u8]> {
        self.atr.as_deref()
    }

    /// Create a reader from a reader state
    pub(crate) fn from_reader_state(reader_state: &ReaderState) -> Self {
        let has_card = card_present(reader_state.event_state());

        let atr = if has_card {
            Some(reader_state.atr().to_vec())
        } else {
            None
        };

        Self {
            name: reader_state.name().to_string_lossy().into_owned(),
            has_card,
            atr,
        }
    }
}

fn card_present(state: State) -> bool {
    state.contains(State::PRESENT) && !state.contains(State::EMPTY)
}

/// A live PC/SC reader able to wait for cards and connect to them
pub struct PcscTerminal {
    context: Context,
    name: String,
    reader_cstr: CString,
    config: PcscConfig,
}

impl fmt::Debug for PcscTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTerminal")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}

impl PcscTerminal {
    pub(crate) fn new(
        context: Context,
        reader_name: &str,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let reader_cstr = CString::new(reader_name)
            .map_err(|_| PcscError::ReaderNotFound(reader_name.to_string()))?;

        Ok(Self {
            context,
            name: reader_name.to_string(),
            reader_cstr,
            config,
        })
    }

    /// Wait until `done` holds for the reader's state, or the timeout elapses
    fn wait_for_state(
        &self,
        timeout: Option<Duration>,
        done: impl Fn(State) -> bool,
    ) -> Result<bool, PcscError> {
        let mut states = [ReaderState::new(self.reader_cstr.clone(), State::UNAWARE)];

        // Non-blocking read of the current state first
        self.context
            .get_status_change(Duration::ZERO, &mut states)?;
        if done(states[0].event_state()) {
            return Ok(true);
        }

        states[0].sync_current_state();
        trace!(reader = %self.name, ?timeout, "waiting for reader state change");
        match self.context.get_status_change(timeout, &mut states) {
            Ok(()) => Ok(done(states[0].event_state())),
            Err(pcsc::Error::Timeout) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl CardReader for PcscTerminal {
    type Transport = PcscTransport;

    fn name(&self) -> &str {
        &self.name
    }

    fn wait_for_card(&mut self, timeout: Option<Duration>) -> Result<bool, TransportError> {
        self.wait_for_state(timeout, card_present)
            .map_err(Into::into)
    }

    fn wait_for_removal(&mut self, timeout: Duration) -> Result<bool, TransportError> {
        self.wait_for_state(Some(timeout), |state| !card_present(state))
            .map_err(Into::into)
    }

    fn connect(&mut self) -> Result<PcscTransport, TransportError> {
        PcscTransport::connect(&self.context, &self.reader_cstr, &self.config).map_err(Into::into)
    }
}
