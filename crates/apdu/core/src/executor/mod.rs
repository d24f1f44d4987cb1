//! Command execution over a transport
//!
//! [`Executor`] is the seam between typed commands and raw bytes; the
//! concrete implementation is [`crate::CardExecutor`].

use std::fmt;

use bytes::Bytes;
use tracing::{instrument, trace};

use crate::command::ApduCommand;
use crate::error::Error;
use crate::{CardTransport, Response};

/// Runs commands against a connected card
pub trait Executor: Send + fmt::Debug {
    /// Transport the executor talks through
    type Transport: CardTransport;

    /// Underlying transport
    fn transport(&self) -> &Self::Transport;

    /// Underlying transport, mutably
    fn transport_mut(&mut self) -> &mut Self::Transport;

    /// Send raw APDU bytes and return the raw reply, status word included
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        self.do_transmit_raw(command)
    }

    /// Implementation of [`Executor::transmit_raw`]
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error>;

    /// Send a typed command and let it interpret the reply
    ///
    /// Errors come back in the command's own type, so each command decides
    /// what a status word means.
    #[instrument(level = "trace", skip_all, fields(ins = command.instruction(), p2 = command.p2()))]
    fn execute<C>(&mut self, command: &C) -> Result<C::Success, C::Error>
    where
        C: ApduCommand,
    {
        let raw = self
            .transmit_raw(&command.to_bytes())
            .map_err(C::convert_error)?;
        let response = Response::from_bytes(&raw)
            .map_err(|e| C::convert_error(e.with_context("Malformed reply")))?;
        trace!(status = %response.status(), "reply");
        C::parse_response(response)
    }
}
