//! PC/SC part 3 storage card commands
//!
//! The reader translates these pseudo-APDUs (class `FF`) into MIFARE Classic
//! air commands. Every command shares [`CommandError`]: a rejected status
//! word is kept apart from transport failures so callers can tell "wrong
//! key" from "card gone".

mod authenticate;
mod get_uid;
mod load_key;
mod read_binary;
mod update_binary;

pub use authenticate::AuthenticateCommand;
pub use get_uid::GetUidCommand;
pub use load_key::LoadKeyCommand;
pub use read_binary::ReadBinaryCommand;
pub use update_binary::UpdateBinaryCommand;

use tagstore_apdu_core::{Response, StatusWord, TransportError};

/// Errors returned by the storage card commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Exchange with the card failed or the reply was malformed
    #[error(transparent)]
    Apdu(#[from] tagstore_apdu_core::Error),

    /// The reader answered with a non-success status word
    #[error("Card rejected command: {0}")]
    Rejected(StatusWord),

    /// The reply payload had the wrong size
    #[error("Unexpected response length: expected {expected}, got {actual}")]
    UnexpectedLength {
        /// Expected payload length
        expected: usize,
        /// Actual payload length
        actual: usize,
    },
}

impl CommandError {
    /// The transport failure behind this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Apdu(e) => e.transport(),
            _ => None,
        }
    }

    /// Status word the card answered with, if it answered
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Rejected(sw) => Some(*sw),
            Self::Apdu(e) => e.status(),
            Self::UnexpectedLength { .. } => None,
        }
    }
}

/// Map a status word onto success or [`CommandError::Rejected`]
fn check_status(response: &Response) -> Result<(), CommandError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(CommandError::Rejected(response.status()))
    }
}

#[cfg(test)]
mod tests {
    use tagstore_apdu_core::prelude::*;

    use super::*;

    #[test]
    fn test_command_error_classification() {
        let rejected = CommandError::Rejected(status::SW_OPERATION_FAILED);
        assert_eq!(rejected.status(), Some(status::SW_OPERATION_FAILED));
        assert!(rejected.transport().is_none());

        let removed = CommandError::from(
            Error::from(TransportError::CardRemoved).with_context("reading"),
        );
        assert_eq!(removed.transport(), Some(&TransportError::CardRemoved));
        assert!(removed.status().is_none());
    }
}
