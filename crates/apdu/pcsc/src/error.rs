//! Error types for PC/SC transport

use std::fmt;

use tagstore_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    Pcsc(#[from] pcsc::Error),

    /// Reader not found
    ReaderNotFound(String),

    /// No card present in reader
    NoCard(String),

    /// Card was removed
    CardRemoved,

    /// Other error
    Other(String),
}

impl fmt::Display for PcscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pcsc(e) => write!(f, "PC/SC error: {}", e),
            Self::ReaderNotFound(r) => write!(f, "Reader not found: {}", r),
            Self::NoCard(r) => write!(f, "No card present in reader: {}", r),
            Self::CardRemoved => write!(f, "Card was removed"),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(e) => match e {
                pcsc::Error::NoSmartcard => Self::NoCard,
                pcsc::Error::RemovedCard | pcsc::Error::ResetCard => Self::CardRemoved,
                pcsc::Error::ReaderUnavailable
                | pcsc::Error::UnknownReader
                | pcsc::Error::NoService
                | pcsc::Error::ServiceStopped
                | pcsc::Error::NoReadersAvailable => Self::ReaderUnavailable(e.to_string()),
                other => Self::Device(other.to_string()),
            },
            PcscError::ReaderNotFound(name) => Self::ReaderUnavailable(name),
            PcscError::NoCard(_) => Self::NoCard,
            PcscError::CardRemoved => Self::CardRemoved,
            PcscError::Other(msg) => Self::Other(msg),
        }
    }
}
