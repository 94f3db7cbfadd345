//! READ RECORD command and record length query
//!
//! The length query sends READ RECORD without Le. Cards answer `6C xx` or `67 xx`
//! with the record length in SW2.

use bytes::Bytes;
use simauth_apdu_core::prelude::*;
use simauth_apdu_core::response::status::common::{SW1_WRONG_LE, SW1_WRONG_LENGTH};

use crate::commands::read_binary::exact_payload;
use crate::constants::{RECORD_MODE_ABSOLUTE, ins};
use crate::error::Error;
use crate::types::CardMode;

/// READ RECORD in absolute mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecordCommand {
    cla: u8,
    record: u8,
    length: u8,
}

impl ReadRecordCommand {
    /// Read `length` bytes of record `record`
    pub const fn new(mode: CardMode, record: u8, length: u8) -> Self {
        Self {
            cla: mode.cla(),
            record,
            length,
        }
    }
}

impl ApduCommand for ReadRecordCommand {
    /// Record content, exactly the requested length
    type Success = Bytes;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        ins::READ_RECORD
    }

    fn p1(&self) -> u8 {
        self.record
    }

    fn p2(&self) -> u8 {
        RECORD_MODE_ABSOLUTE
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<u8> {
        Some(self.length)
    }

    fn parse_response(&self, response: Response) -> Result<Bytes, Error> {
        exact_payload(response, self.length)
    }
}

/// READ RECORD without Le, used to learn a record's length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLengthCommand {
    cla: u8,
    record: u8,
}

impl RecordLengthCommand {
    /// Probe the length of record `record`
    pub const fn new(mode: CardMode, record: u8) -> Self {
        Self {
            cla: mode.cla(),
            record,
        }
    }
}

impl ApduCommand for RecordLengthCommand {
    /// Record length
    type Success = u8;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        ins::READ_RECORD
    }

    fn p1(&self) -> u8 {
        self.record
    }

    fn p2(&self) -> u8 {
        RECORD_MODE_ABSOLUTE
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<u8> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<u8, Error> {
        let status = response.status();
        match status.sw1 {
            SW1_WRONG_LE | SW1_WRONG_LENGTH => Ok(status.sw2),
            _ => Err(Error::ProtocolViolation {
                command: "READ RECORD",
                status,
            }),
        }
    }
}
