use std::fmt;

use derive_more::From;

/// Card unique identifier as returned by GET DATA
///
/// Displays as upper-case hex, which is also the debounce key.
#[derive(Clone, Default, PartialEq, Eq, Hash, From)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Create a UID from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Upper-case hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }
}

impl AsRef<[u8]> for Uid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid({})", self.to_hex())
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
