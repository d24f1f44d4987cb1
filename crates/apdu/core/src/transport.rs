//! Card transport abstraction
//!
//! A transport moves raw APDU bytes to a connected card and back. It knows
//! nothing about command semantics.

use std::collections::VecDeque;
use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace};

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Error reported by the underlying device or service
    #[error("Device error: {0}")]
    Device(String),

    /// No card in the field
    #[error("No card present")]
    NoCard,

    /// Card left the field mid-exchange
    #[error("Card was removed")]
    CardRemoved,

    /// The reader went away (unplugged, service stopped)
    #[error("Reader unavailable: {0}")]
    ReaderUnavailable(String),

    /// The transport is not connected to a card
    #[error("Not connected")]
    NotConnected,

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether the card or reader is gone, so no later exchange on this
    /// connection can succeed
    pub const fn is_channel_lost(&self) -> bool {
        matches!(
            self,
            Self::NoCard | Self::CardRemoved | Self::NotConnected | Self::ReaderUnavailable(_)
        )
    }
}

/// A channel to a connected card
pub trait CardTransport: Send + fmt::Debug {
    /// Transmit raw command bytes and return the raw response bytes
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = %hex::encode(command), "transport tx");
        let response = self.do_transmit_raw(command);
        match &response {
            Ok(bytes) => trace!(response = %hex::encode(bytes), "transport rx"),
            Err(err) => debug!(error = %err, "transport error"),
        }
        response
    }

    /// Implementation of [`CardTransport::transmit_raw`]
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Whether a card connection is currently held
    fn is_connected(&self) -> bool;

    /// Release the card connection, leaving the card powered
    fn disconnect(&mut self) -> Result<(), TransportError>;
}

impl<T: CardTransport + ?Sized> CardTransport for &mut T {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).transmit_raw(command)
    }

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).do_transmit_raw(command)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        (**self).disconnect()
    }
}

/// Scripted transport replaying queued responses, recording every command
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: VecDeque<Result<Bytes, TransportError>>,
    fallback: Option<Bytes>,
    sent: Vec<Bytes>,
    connected: bool,
}

impl MockTransport {
    /// Create a connected mock with an empty script
    pub fn new() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Create a mock answering every command with `response`
    pub fn with_response(response: Bytes) -> Self {
        Self {
            fallback: Some(response),
            ..Self::new()
        }
    }

    /// Queue the next response
    pub fn push_response(&mut self, response: Result<Bytes, TransportError>) -> &mut Self {
        self.responses.push_back(response);
        self
    }

    /// Commands sent so far
    pub fn sent(&self) -> &[Bytes] {
        &self.sent
    }
}

impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.sent.push(Bytes::copy_from_slice(command));
        match self.responses.pop_front() {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| TransportError::Other("No scripted response".to_string())),
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        self.connected = false;
        Ok(())
    }
}
