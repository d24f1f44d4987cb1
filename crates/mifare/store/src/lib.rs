//! Text record storage on MIFARE Classic 1K cards
//!
//! This crate turns a sector-protected, 1 KiB MIFARE Classic card into a
//! carrier for a short UTF-8 record. It talks to the card through PC/SC
//! pseudo-APDUs (`FF 82` load key, `FF 86` authenticate, `FF B0` read,
//! `FF D6` update, `FF CA` UID) over any [`tagstore_apdu_core::CardTransport`].
//!
//! The entry point is [`TagStore`], which offers three operations:
//!
//! - [`TagStore::read_uid_and_data`] waits for a card, debounces repeated
//!   presentations and returns the card UID with the printable text found in
//!   every sector it can authenticate.
//! - [`TagStore::write_text`] splits a payload into 16-byte blocks, places
//!   them on the blocks that authenticate with a known transport key and
//!   verifies every block by reading it back.
//! - [`TagStore::erase`] zeroes every data block it can authenticate.
//!
//! All cross-operation state (busy flag, debounce table, cancellation) lives
//! in an explicit [`SessionContext`] so several stores, or tests, never share
//! hidden globals.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod addressing;
pub mod auth;
pub mod codec;
pub mod commands;
mod config;
mod constants;
mod context;
mod debounce;
pub mod discovery;
pub mod erase;
mod error;
mod poller;
pub mod read;
mod session;
mod store;
mod types;
pub mod write;

pub use codec::{Chunk, CodecError};
pub use config::StoreConfig;
pub use constants::*;
pub use context::{BusyGuard, CancellationToken, SessionContext};
pub use debounce::DebounceCache;
pub use error::{BlockFailure, Error, Result};
pub use poller::Poller;
pub use session::CardSession;
pub use store::TagStore;
pub use types::{
    BlockAuthorization, EraseReport, Key, KeyParseError, KeyType, ReadResult, Uid, WriteResult,
};
