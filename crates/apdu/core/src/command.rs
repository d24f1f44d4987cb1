//! Typed APDU commands
//!
//! Only short APDUs are supported: Lc and Le are single bytes, which covers
//! every PC/SC storage card pseudo-APDU.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Response};

/// Expected length (Le) byte; `0` asks for everything available
pub type ExpectedLength = u8;

/// A command that knows its header, body and how to read its reply
pub trait ApduCommand {
    /// Value produced from a successful reply
    type Success;

    /// Error produced from a failed exchange or rejected reply
    type Error: fmt::Debug;

    /// Lift a core error into the command's error type
    fn convert_error(error: Error) -> Self::Error;

    /// Class byte (CLA)
    fn class(&self) -> u8;

    /// Instruction byte (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command body, sent after Lc
    fn data(&self) -> Option<&[u8]>;

    /// Le byte, if the command expects a payload back
    fn expected_length(&self) -> Option<ExpectedLength>;

    /// Serialize as `CLA INS P1 P2 [Lc data] [Le]`
    fn to_bytes(&self) -> Bytes {
        let data = self.data().unwrap_or_default();
        let mut buffer = BytesMut::with_capacity(6 + data.len());

        buffer.put_slice(&[self.class(), self.instruction(), self.p1(), self.p2()]);
        if !data.is_empty() {
            buffer.put_u8(data.len() as u8);
            buffer.put_slice(data);
        }
        if let Some(le) = self.expected_length() {
            buffer.put_u8(le);
        }

        buffer.freeze()
    }

    /// Interpret a parsed reply
    fn parse_response(response: Response) -> Result<Self::Success, Self::Error>;

    /// Interpret raw reply bytes, status word included
    fn parse_response_raw(bytes: Bytes) -> Result<Self::Success, Self::Error> {
        let response = Response::from_bytes(&bytes).map_err(Self::convert_error)?;
        Self::parse_response(response)
    }
}
