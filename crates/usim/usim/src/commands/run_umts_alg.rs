//! AUTHENTICATE command in 3G context (RUN UMTS ALG)
//!
//! Data field is `10 || RAND || 10 || AUTN`. The card answers `61 xx` when
//! it has a result (success or synchronisation failure) ready for GET
//! RESPONSE, and `98 62` when AUTN does not verify.

use simauth_apdu_core::prelude::*;
use simauth_apdu_core::response::status::common::SW1_BYTES_AVAILABLE;

use crate::constants::{AUTH_CONTEXT_3G, AUTN_LEN, RAND_LEN, ins};
use crate::error::Error;
use crate::status::{StatusClass, classify};
use crate::types::CardMode;

const DATA_LEN: usize = 2 + RAND_LEN + AUTN_LEN;

/// RUN UMTS ALG command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunUmtsAlgCommand {
    cla: u8,
    data: [u8; DATA_LEN],
}

impl RunUmtsAlgCommand {
    /// Authenticate with `rand` and `autn`
    pub fn new(mode: CardMode, rand: &[u8; RAND_LEN], autn: &[u8; AUTN_LEN]) -> Self {
        let mut data = [0u8; DATA_LEN];
        data[0] = RAND_LEN as u8;
        data[1..1 + RAND_LEN].copy_from_slice(rand);
        data[1 + RAND_LEN] = AUTN_LEN as u8;
        data[2 + RAND_LEN..].copy_from_slice(autn);

        Self {
            cla: mode.cla(),
            data,
        }
    }
}

impl ApduCommand for RunUmtsAlgCommand {
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
        ins::AUTHENTICATE
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        AUTH_CONTEXT_3G
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data[..])
    }

    fn expected_length(&self) -> Option<u8> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<u8, Error> {
        let status = response.status();
        match classify(status) {
            StatusClass::MacMismatch => return Err(Error::MacMismatch),
            StatusClass::SecurityDenied => return Err(Error::SecurityDenied(status)),
            StatusClass::ClaUnsupported => return Err(Error::ClaUnsupported(status)),
            _ => {}
        }

        if response.wire_len() != 2 {
            return Err(Error::UnexpectedLength {
                command: "AUTHENTICATE",
                actual: response.wire_len(),
            });
        }

        if status.sw1 != SW1_BYTES_AVAILABLE {
            return Err(Error::ProtocolViolation {
                command: "AUTHENTICATE",
                status,
            });
        }

        Ok(status.sw2)
    }
}
