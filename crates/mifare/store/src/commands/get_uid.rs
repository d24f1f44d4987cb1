use tagstore_apdu_core::{ApduCommand, Error, ExpectedLength, Response};

use super::{CommandError, check_status};
use crate::constants::{CLA_PCSC, ins};
use crate::types::Uid;

/// GET DATA with P1 = 0: the card UID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetUidCommand;

impl ApduCommand for GetUidCommand {
    type Success = Uid;
    type Error = CommandError;

    fn convert_error(error: Error) -> Self::Error {
        CommandError::Apdu(error)
    }

    fn class(&self) -> u8 {
        CLA_PCSC
    }

    fn instruction(&self) -> u8 {
        ins::GET_DATA
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    // Le = 0: full UID, whatever its length
    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(0x00)
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        check_status(&response)?;
        match response.payload() {
            Some(uid) if !uid.is_empty() => Ok(Uid::new(uid.to_vec())),
            _ => Err(CommandError::UnexpectedLength {
                expected: 4,
                actual: 0,
            }),
        }
    }
}
