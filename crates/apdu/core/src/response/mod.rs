//! APDU response parsing

pub mod status;

use bytes::Bytes;

use crate::Error;
use status::StatusWord;

/// A parsed APDU response: optional payload followed by a status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    payload: Option<Bytes>,
    status: StatusWord,
}

impl Response {
    /// Create a response from its parts
    pub const fn new(payload: Option<Bytes>, status: StatusWord) -> Self {
        Self { payload, status }
    }

    /// Parse raw response bytes (payload || SW1 || SW2)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::InvalidResponseLength(bytes.len()));
        }

        let split = bytes.len() - 2;
        let status = StatusWord::new(bytes[split], bytes[split + 1]);
        let payload = (split > 0).then(|| Bytes::copy_from_slice(&bytes[..split]));

        Ok(Self { payload, status })
    }

    /// Response payload, without the status word
    pub const fn payload(&self) -> &Option<Bytes> {
        &self.payload
    }

    /// Status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Whether the status word is `90 00`
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
