//! PC/SC transport implementation for APDU operations
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `simauth-apdu-core` using the PC/SC API for communication with SIM and
//! USIM cards.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use simauth_apdu_core::prelude::*;
//! use simauth_apdu_transport_pcsc::PcscDeviceManager;
//!
//! let manager = PcscDeviceManager::new()?;
//!
//! let readers = manager.list_readers()?;
//! let Some(reader) = readers.iter().find(|r| r.has_card()) else {
//!     println!("No card present");
//!     return Ok(());
//! };
//!
//! let transport = manager.open_reader(reader.name())?;
//! let mut executor = CardExecutor::new(transport);
//!
//! // SELECT MF under the USIM class byte
//! let raw = executor.transmit_raw(&[0x00, 0xA4, 0x00, 0x00, 0x02, 0x3F, 0x00])?;
//! let response = Response::from_bytes(&raw)?;
//! println!("Status: {}", response.status());
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

pub use config::{ConnectStrategy, PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};
