//! SELECT command
//!
//! Selects a file by identifier (`P1=00`) or an application by AID
//! (`P1=04`). A card answers with a bare status word announcing how many
//! FCP bytes GET RESPONSE can fetch.

use bytes::Bytes;
use simauth_apdu_core::prelude::*;

use crate::constants::ins;
use crate::error::Error;
use crate::status::{StatusClass, classify};
use crate::types::{Aid, CardMode, FileRef};

/// SELECT command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    cla: u8,
    p1: u8,
    data: Bytes,
}

impl SelectCommand {
    /// Select `target` under `mode`
    pub fn new(mode: CardMode, target: &FileRef) -> Self {
        match target {
            FileRef::Id(id) => Self::file(mode, *id),
            FileRef::Aid(aid) => Self::aid(mode, aid),
        }
    }

    /// Select a file by its two-byte identifier
    pub fn file(mode: CardMode, id: u16) -> Self {
        Self {
            cla: mode.cla(),
            p1: 0x00,
            data: Bytes::copy_from_slice(&id.to_be_bytes()),
        }
    }

    /// Select an application by AID
    pub fn aid(mode: CardMode, aid: &Aid) -> Self {
        Self {
            cla: mode.cla(),
            p1: 0x04,
            data: Bytes::copy_from_slice(aid.as_bytes()),
        }
    }
}

impl ApduCommand for SelectCommand {
    /// Number of bytes GET RESPONSE should request
    type Success = u8;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        ins::SELECT
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data[..])
    }

    fn expected_length(&self) -> Option<u8> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<u8, Error> {
        if response.wire_len() != 2 {
            return Err(Error::UnexpectedLength {
                command: "SELECT",
                actual: response.wire_len(),
            });
        }

        let status = response.status();
        match classify(status) {
            StatusClass::MoreData(available) => Ok(available),
            StatusClass::SecurityDenied => Err(Error::SecurityDenied(status)),
            StatusClass::ClaUnsupported => Err(Error::ClaUnsupported(status)),
            _ => Err(Error::ProtocolViolation {
                command: "SELECT",
                status,
            }),
        }
    }
}
