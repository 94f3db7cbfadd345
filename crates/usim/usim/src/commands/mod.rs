//! Command APDUs understood by SIM and USIM cards
//!
//! Each command builds its exact byte sequence for a [`CardMode`] and
//! interprets the card's answer through the status table.
//!
//! [`CardMode`]: crate::CardMode

pub mod get_response;
pub mod read_binary;
pub mod read_record;
pub mod run_gsm_alg;
pub mod run_umts_alg;
pub mod select;

pub use get_response::GetResponseCommand;
pub use read_binary::ReadBinaryCommand;
pub use read_record::{ReadRecordCommand, RecordLengthCommand};
pub use run_gsm_alg::RunGsmAlgCommand;
pub use run_umts_alg::RunUmtsAlgCommand;
pub use select::SelectCommand;
