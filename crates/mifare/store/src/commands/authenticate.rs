use tagstore_apdu_core::{ApduCommand, Error, ExpectedLength, Response};

use super::{CommandError, check_status};
use crate::constants::{CLA_PCSC, ins};
use crate::types::KeyType;

/// GENERAL AUTHENTICATE: authenticate a block with the key in a reader slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticateCommand {
    // Version 01, MSB 00, LSB block, key type, key slot
    data: [u8; 5],
}

impl AuthenticateCommand {
    /// Authenticate `block` with `key_type` using the key loaded in `slot`
    pub const fn new(block: u8, key_type: KeyType, slot: u8) -> Self {
        Self {
            data: [0x01, 0x00, block, key_type.code(), slot],
        }
    }

    /// Target block
    pub const fn block(&self) -> u8 {
        self.data[2]
    }
}

impl ApduCommand for AuthenticateCommand {
    type Success = ();
    type Error = CommandError;

    fn convert_error(error: Error) -> Self::Error {
        CommandError::Apdu(error)
    }

    fn class(&self) -> u8 {
        CLA_PCSC
    }

    fn instruction(&self) -> u8 {
        ins::GENERAL_AUTHENTICATE
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
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
