use tagstore_apdu_core::{ApduCommand, Error, ExpectedLength, Response};

use super::{CommandError, check_status};
use crate::constants::{CLA_PCSC, ins};
use crate::types::Key;

/// LOAD KEYS: store a key in the reader's volatile key slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadKeyCommand {
    slot: u8,
    key: Key,
}

impl LoadKeyCommand {
    /// Load `key` into volatile `slot`
    pub const fn new(slot: u8, key: Key) -> Self {
        Self { slot, key }
    }
}

impl ApduCommand for LoadKeyCommand {
    type Success = ();
    type Error = CommandError;

    fn convert_error(error: Error) -> Self::Error {
        CommandError::Apdu(error)
    }

    fn class(&self) -> u8 {
        CLA_PCSC
    }

    fn instruction(&self) -> u8 {
        ins::LOAD_KEYS
    }

    // P1 = 0x00: volatile key structure
    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        self.slot
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.key.as_bytes())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        check_status(&response)
    }
}
