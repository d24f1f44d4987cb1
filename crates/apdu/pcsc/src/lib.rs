//! PC/SC transport implementation for APDU operations
//!
//! This crate implements the `CardTransport`, `CardReader` and
//! `ReaderEnumerator` traits from `tagstore-apdu-core` on top of the PC/SC
//! API, for contactless readers such as the ACR122U.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use tagstore_apdu_core::prelude::*;
//! use tagstore_apdu_transport_pcsc::PcscDeviceManager;
//!
//! let manager = PcscDeviceManager::new()?;
//!
//! let Some(mut reader) = manager.first_reader()? else {
//!     println!("No readers found");
//!     return Ok(());
//! };
//!
//! if reader.wait_for_card(Some(Duration::from_secs(5)))? {
//!     let mut executor = CardExecutor::new(reader.connect()?);
//!     let reply = executor.transmit_raw(&[0xFF, 0xCA, 0x00, 0x00, 0x00])?;
//!     println!("UID response: {:?}", Response::from_bytes(&reply)?);
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;
mod util;

pub use config::{PcscConfig, Release, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::{PcscReader, PcscTerminal};
pub use transport::PcscTransport;
pub use util::{CardName, card_name_from_atr};

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols, Status};
