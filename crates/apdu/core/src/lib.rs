//! Core traits and types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types and traits for talking to a
//! contactless card through a PC/SC-style reader using ISO/IEC 7816-4 APDUs.
//!
//! ## Overview
//!
//! - Creating and parsing APDU commands and responses
//! - Communicating with cards through different transport layers
//! - Enumerating readers and waiting for card presence or removal
//! - Error handling and status word interpretation
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::Bytes;

// Main modules
pub mod card;
pub mod command;
pub mod error;
pub mod executor;
pub mod reader;
pub mod response;
pub mod transport;

pub use card::CardExecutor;
pub use command::{ApduCommand, ExpectedLength};
pub use error::Error;
pub use executor::Executor;
pub use reader::{CardReader, ReaderEnumerator};
pub use response::Response;
pub use response::status::StatusWord;
pub use transport::{CardTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    // Core types
    pub use crate::{Bytes, Error};

    // Command related
    pub use crate::command::{ApduCommand, ExpectedLength};

    // Response related
    pub use crate::Response;
    pub use crate::response::status::{StatusWord, common as status};

    // Transport and reader layer
    pub use crate::reader::{CardReader, ReaderEnumerator};
    pub use crate::transport::{CardTransport, TransportError};

    // Executor layer
    pub use crate::card::CardExecutor;
    pub use crate::executor::Executor;
}
