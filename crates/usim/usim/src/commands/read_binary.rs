//! READ BINARY command

use bytes::Bytes;
use simauth_apdu_core::prelude::*;

use crate::constants::ins;
use crate::error::Error;
use crate::types::CardMode;

/// READ BINARY from offset zero of the selected transparent file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBinaryCommand {
    cla: u8,
    length: u8,
}

impl ReadBinaryCommand {
    /// Read `length` bytes
    pub const fn new(mode: CardMode, length: u8) -> Self {
        Self {
            cla: mode.cla(),
            length,
        }
    }
}

impl ApduCommand for ReadBinaryCommand {
    /// File content, exactly the requested length
    type Success = Bytes;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        ins::READ_BINARY
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
        exact_payload(response, self.length)
    }
}

/// Payload of a read response that must be `length` bytes followed by `90 00`
pub(crate) fn exact_payload(response: Response, length: u8) -> Result<Bytes, Error> {
    let expected = usize::from(length);
    if response.wire_len() != expected + 2 || !response.is_success() {
        return Err(Error::MalformedRead {
            expected,
            raw: response.to_bytes(),
        });
    }

    Ok(response.data.unwrap_or_default())
}
