//! Core traits and types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types and traits for exchanging
//! ISO/IEC 7816-4 command and response APDUs with SIM and USIM cards.
//!
//! ## Overview
//!
//! - The [`ApduCommand`] trait builds byte-exact command APDUs
//! - [`Response`] and [`StatusWord`] split a response into payload and SW1/SW2
//! - [`CardTransport`] is the single blocking `transmit` boundary to a card
//! - [`CardExecutor`] drives a transport and logs every exchange
//!
//! A scripted [`transport::MockTransport`] is provided for tests that need to
//! assert the exact sequence of commands sent to a card.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod card;
pub mod command;
pub mod error;
pub mod executor;
pub mod response;
pub mod transport;

pub use card::CardExecutor;
pub use command::{ApduCommand, MAX_SHORT_DATA_LEN};
pub use error::{Error, Result, ResultExt};
pub use executor::Executor;
pub use response::status::StatusWord;
pub use response::{ApduResponse, Response};
pub use transport::{CardTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{Bytes, BytesMut, Error, ResultExt};

    pub use crate::command::ApduCommand;

    pub use crate::Response;
    pub use crate::response::ApduResponse;
    pub use crate::response::status::{StatusWord, common as status};

    pub use crate::transport::{CardTransport, TransportError};

    pub use crate::card::CardExecutor;
    pub use crate::executor::Executor;
}
