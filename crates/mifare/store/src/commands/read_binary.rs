use tagstore_apdu_core::{ApduCommand, Error, ExpectedLength, Response};

use super::{CommandError, check_status};
use crate::codec::Chunk;
use crate::constants::{BLOCK_SIZE, CLA_PCSC, ins};

/// READ BINARY of one 16-byte block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBinaryCommand {
    block: u8,
}

impl ReadBinaryCommand {
    /// Read `block`; the sector must already be authenticated
    pub const fn new(block: u8) -> Self {
        Self { block }
    }
}

impl ApduCommand for ReadBinaryCommand {
    type Success = Chunk;
    type Error = CommandError;

    fn convert_error(error: Error) -> Self::Error {
        CommandError::Apdu(error)
    }

    fn class(&self) -> u8 {
        CLA_PCSC
    }

    fn instruction(&self) -> u8 {
        ins::READ_BINARY
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        self.block
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(BLOCK_SIZE as ExpectedLength)
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        check_status(&response)?;
        let payload = response.payload().as_deref().unwrap_or_default();
        payload
            .try_into()
            .map_err(|_| CommandError::UnexpectedLength {
                expected: BLOCK_SIZE,
                actual: payload.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use tagstore_apdu_core::Bytes;

    use super::*;

    #[test]
    fn test_read_binary_bytes() {
        let cmd = ReadBinaryCommand::new(0x05);
        assert_eq!(
            cmd.to_bytes().as_ref(),
            hex::decode("FFB0000510").unwrap().as_slice()
        );
    }

    #[test]
    fn test_read_binary_response() {
        let mut raw = vec![0x41; 16];
        raw.extend_from_slice(&[0x90, 0x00]);
        let chunk = ReadBinaryCommand::parse_response_raw(Bytes::from(raw)).unwrap();
        assert_eq!(chunk, [0x41; 16]);

        let short = Bytes::from_static(&[0x41, 0x42, 0x90, 0x00]);
        assert!(matches!(
            ReadBinaryCommand::parse_response_raw(short),
            Err(CommandError::UnexpectedLength {
                expected: 16,
                actual: 2
            })
        ));

        let denied = Bytes::from_static(&[0x69, 0x82]);
        assert!(matches!(
            ReadBinaryCommand::parse_response_raw(denied),
            Err(CommandError::Rejected(_))
        ));
    }
}
