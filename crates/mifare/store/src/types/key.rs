use std::fmt;
use std::str::FromStr;

use derive_more::{Display, From};

/// A 6-byte MIFARE Classic sector key
#[derive(Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct Key([u8; 6]);

impl Key {
    /// Key length in bytes
    pub const LEN: usize = 6;

    /// Create a key from its raw bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", hex::encode_upper(self.0))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

/// Errors parsing a [`Key`] from hex
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KeyParseError {
    /// Input was not valid hex
    #[error("Invalid key hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Input decoded to the wrong number of bytes
    #[error("Key must be 6 bytes, got {0}")]
    Length(usize),
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())?;
        let bytes: [u8; 6] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyParseError::Length(bytes.len()))?;
        Ok(Self(bytes))
    }
}

/// Which of the two sector keys to authenticate with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum KeyType {
    /// Key A
    #[display("A")]
    A,
    /// Key B
    #[display("B")]
    B,
}

impl KeyType {
    /// Both key types in the order they are tried
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Key type byte carried by GENERAL AUTHENTICATE
    pub const fn code(self) -> u8 {
        match self {
            Self::A => 0x60,
            Self::B => 0x61,
        }
    }
}
