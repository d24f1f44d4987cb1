//! Card executor implementation
//!
//! This module provides the CardExecutor implementation, which wraps a card
//! transport and executes typed commands over it.

use std::fmt;

use crate::error::Error;
use crate::executor::Executor;
use crate::transport::CardTransport;
use bytes::Bytes;

/// Card executor implementation over a transport
pub struct CardExecutor<T>
where
    T: CardTransport,
{
    transport: T,
}

impl<T> fmt::Debug for CardExecutor<T>
where
    T: CardTransport,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardExecutor")
            .field("transport", &self.transport)
            .finish()
    }
}

impl<T> CardExecutor<T>
where
    T: CardTransport,
{
    /// Create a new card executor with the given transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T> Executor for CardExecutor<T>
where
    T: CardTransport,
{
    type Transport = T;

    fn transport(&self) -> &T {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        Ok(self.transport.transmit_raw(command)?)
    }
}
