use tagstore_apdu_core::{ApduCommand, Error, ExpectedLength, Response};

use super::{CommandError, check_status};
use crate::codec::Chunk;
use crate::constants::{CLA_PCSC, ins};

/// UPDATE BINARY of one 16-byte block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateBinaryCommand {
    block: u8,
    data: Chunk,
}

impl UpdateBinaryCommand {
    /// Overwrite `block` with `data`; the sector must already be authenticated
    pub const fn new(block: u8, data: Chunk) -> Self {
        Self { block, data }
    }
}

impl ApduCommand for UpdateBinaryCommand {
    type Success = ();
    type Error = CommandError;

    fn convert_error(error: Error) -> Self::Error {
        CommandError::Apdu(error)
    }

    fn class(&self) -> u8 {
        CLA_PCSC
    }

    fn instruction(&self) -> u8 {
        ins::UPDATE_BINARY
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        self.block
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        check_status(&response)
    }
}
