//! Error types for the tag store

use std::time::Duration;

use tagstore_apdu_core::TransportError;

use crate::codec::{Chunk, CodecError};
use crate::commands::CommandError;
use crate::types::KeyType;

/// Result type for tag store operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Tag store errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No reader is attached to the system
    #[error("No card reader found")]
    NoReader,

    /// No card was presented in time
    #[error("No card presented within {waited:?}")]
    Timeout {
        /// How long the operation waited
        waited: Duration,
    },

    /// The session's cancellation token fired during a wait
    #[error("Operation cancelled")]
    Cancelled,

    /// Payload rejected before touching the card
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] CodecError),

    /// Not enough authenticatable blocks for the payload; nothing was written
    #[error("Payload needs {required} blocks but the card only has {available} writable")]
    InsufficientCapacity {
        /// Blocks the payload needs
        required: usize,
        /// Blocks that authenticated
        available: usize,
    },

    /// A block read back different bytes than were written
    #[error(
        "Verification failed on block {block}: wrote {}, read {}",
        hex::encode_upper(.expected),
        hex::encode_upper(.actual)
    )]
    WriteVerification {
        /// Block that failed verification
        block: u8,
        /// Bytes written
        expected: Chunk,
        /// Bytes read back
        actual: Chunk,
        /// Blocks changed so far, this one included
        written: Vec<u8>,
    },

    /// A block could not be written; earlier blocks hold partial data
    #[error("Write aborted at block {block} after {} written blocks: {source}", .written.len())]
    WriteAborted {
        /// Block being written
        block: u8,
        /// Blocks changed before the failure, this one included if its update
        /// went through
        written: Vec<u8>,
        /// Cause
        #[source]
        source: BlockFailure,
    },

    /// The card answered a required command with an error status
    #[error(transparent)]
    Command(CommandError),

    /// Reader or channel failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Whether retrying with the card re-presented can succeed
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Cancelled
                | Self::WriteVerification { .. }
                | Self::WriteAborted { .. }
                | Self::Transport(TransportError::NoCard | TransportError::CardRemoved)
        )
    }

    /// Blocks whose contents a failed write changed
    pub fn partially_written(&self) -> &[u8] {
        match self {
            Self::WriteVerification { written, .. } | Self::WriteAborted { written, .. } => written,
            _ => &[],
        }
    }
}

impl From<CommandError> for Error {
    fn from(error: CommandError) -> Self {
        match error.transport() {
            Some(transport) => Self::Transport(transport.clone()),
            None => Self::Command(error),
        }
    }
}

/// Why a single block write failed
#[derive(Debug, thiserror::Error)]
pub enum BlockFailure {
    /// The key that opened the block during discovery no longer works
    #[error("Key {key_type} no longer authenticates")]
    Authentication {
        /// Key type that was tried
        key_type: KeyType,
    },

    /// UPDATE or READ BINARY failed
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Channel failure during authentication
    #[error(transparent)]
    Transport(#[from] TransportError),
}
