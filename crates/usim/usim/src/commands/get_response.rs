//! GET RESPONSE command
//!
//! Fetches the bytes a previous command announced in its status word.

use bytes::Bytes;
use simauth_apdu_core::prelude::*;

use crate::constants::ins;
use crate::error::Error;
use crate::status::{StatusClass, classify};
use crate::types::CardMode;

/// GET RESPONSE command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetResponseCommand {
    cla: u8,
    length: u8,
}

impl GetResponseCommand {
    /// Request `length` pending bytes
    pub const fn new(mode: CardMode, length: u8) -> Self {
        Self {
            cla: mode.cla(),
            length,
        }
    }
}

impl ApduCommand for GetResponseCommand {
    /// Raw response, status word included
    type Success = Bytes;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        ins::GET_RESPONSE
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<u8> {
        Some(self.length)
    }

    fn parse_response(&self, response: Response) -> Result<Bytes, Error> {
        let status = response.status();
        match classify(status) {
            StatusClass::Success => Ok(response.to_bytes()),
            StatusClass::SecurityDenied => Err(Error::SecurityDenied(status)),
            StatusClass::ClaUnsupported => Err(Error::ClaUnsupported(status)),
            _ => Err(Error::ProtocolViolation {
                command: "GET RESPONSE",
                status,
            }),
        }
    }
}
