//! PC/SC transport implementation

use std::ffi::CStr;
use std::fmt;

use pcsc::{Card, Context, MAX_BUFFER_SIZE};
use tagstore_apdu_core::{Bytes, CardTransport, TransportError};
use tracing::debug;

use crate::config::{PcscConfig, Release};
use crate::error::PcscError;

/// Transport implementation using PC/SC
pub struct PcscTransport {
    /// Card connection, if established
    card: Option<Card>,
    /// Reader name
    reader_name: String,
    /// Disposition applied when the connection is released
    release: Release,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("reader_name", &self.reader_name)
            .field("has_card", &self.card.is_some())
            .field("release", &self.release)
            .finish()
    }
}

impl PcscTransport {
    /// Connect to the card in the given reader
    pub(crate) fn connect(
        context: &Context,
        reader: &CStr,
        config: &PcscConfig,
    ) -> Result<Self, PcscError> {
        let reader_name = reader.to_string_lossy().into_owned();

        match context.connect(reader, config.share_mode.into(), config.protocols) {
            Ok(card) => {
                debug!(reader = %reader_name, "connected to card");
                Ok(Self {
                    card: Some(card),
                    reader_name,
                    release: config.release,
                })
            }
            Err(pcsc::Error::NoSmartcard) => Err(PcscError::NoCard(reader_name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the ATR of the current card
    pub fn atr(&self) -> Result<Vec<u8>, PcscError> {
        self.card.as_ref().map_or_else(
            || Err(PcscError::NoCard(self.reader_name.clone())),
            |card| {
                card.get_attribute_owned(pcsc::Attribute::AtrString)
                    .map_err(Into::into)
            },
        )
    }

    /// Get the reader name
    pub fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn transmit_command(&mut self, command: &[u8]) -> Result<Bytes, PcscError> {
        let card = self
            .card
            .as_mut()
            .ok_or_else(|| PcscError::NoCard(self.reader_name.clone()))?;

        let mut response_buffer = [0u8; MAX_BUFFER_SIZE];

        match card.transmit(command, &mut response_buffer) {
            Ok(response) => Ok(Bytes::copy_from_slice(response)),
            Err(e) => {
                // A removed or reset card invalidates the handle
                if matches!(e, pcsc::Error::ResetCard | pcsc::Error::RemovedCard) {
                    self.card = None;
                }
                Err(e.into())
            }
        }
    }
}

impl CardTransport for PcscTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.transmit_command(command).map_err(TransportError::from)
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        match self.card.take() {
            Some(card) => card
                .disconnect(self.release.into())
                .map_err(|(_, e)| PcscError::from(e).into()),
            None => Ok(()),
        }
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            let _ = card.disconnect(self.release.into());
        }
    }
}
