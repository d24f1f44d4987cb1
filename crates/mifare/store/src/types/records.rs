use std::time::SystemTime;

use crate::types::{Key, KeyType, Uid};

/// A block together with the credentials that opened it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAuthorization {
    /// Absolute block index
    pub block: u8,
    /// Key type that authenticated
    pub key_type: KeyType,
    /// Key that authenticated
    pub key: Key,
}

impl BlockAuthorization {
    /// Record a successful authentication
    pub const fn new(block: u8, key_type: KeyType, key: Key) -> Self {
        Self {
            block,
            key_type,
            key,
        }
    }
}

/// Outcome of an accepted read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    /// Card UID
    pub uid: Uid,
    /// Printable text recovered from the readable sectors, possibly empty
    pub text: String,
}

/// Outcome of a verified write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Card UID
    pub uid: Uid,
    /// Blocks written, ascending; one per chunk
    pub blocks: Vec<u8>,
    /// Text as stored, after trimming
    pub text: String,
    /// When the last block was verified
    pub timestamp: SystemTime,
}

/// Outcome of an erase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraseReport {
    /// Card UID
    pub uid: Uid,
    /// Blocks zeroed
    pub erased: Vec<u8>,
    /// Blocks that could not be authenticated or written
    pub skipped: Vec<u8>,
}
