//! Reader abstraction
//!
//! A reader is the physical terminal a card is presented to. Waiting for a
//! card and waiting for its removal are the two blocking points of every card
//! session, so both take an explicit bound; callers that need cancellation
//! wait in short slices and check their own signal between slices.

use std::fmt;
use std::time::Duration;

use crate::transport::{CardTransport, TransportError};

/// A single card reader
pub trait CardReader: Send + fmt::Debug {
    /// Transport produced when connecting to the card in this reader
    type Transport: CardTransport;

    /// Reader name as reported by the system
    fn name(&self) -> &str;

    /// Block until a card is present or `timeout` elapses
    ///
    /// Returns `Ok(true)` when a card is in the field. `None` waits without
    /// bound.
    fn wait_for_card(&mut self, timeout: Option<Duration>) -> Result<bool, TransportError>;

    /// Block until the field is empty or `timeout` elapses
    ///
    /// Returns `Ok(true)` once no card is present.
    fn wait_for_removal(&mut self, timeout: Duration) -> Result<bool, TransportError>;

    /// Connect to the card currently in the field
    fn connect(&mut self) -> Result<Self::Transport, TransportError>;
}

/// Source of readers attached to the system
pub trait ReaderEnumerator: Send + Sync + fmt::Debug {
    /// Reader type produced by this enumerator
    type Reader: CardReader;

    /// All readers currently attached; an empty list is a normal result
    fn readers(&self) -> Result<Vec<Self::Reader>, TransportError>;

    /// First attached reader, if any
    fn first_reader(&self) -> Result<Option<Self::Reader>, TransportError> {
        Ok(self.readers()?.into_iter().next())
    }
}
