//! RUN GSM ALGORITHM command (GSM 11.11)
//!
//! Always sent under the GSM class byte.

use simauth_apdu_core::prelude::*;
use simauth_apdu_core::response::status::common::SW1_GSM_BYTES_AVAILABLE;

use crate::constants::{RAND_LEN, cla, ins};
use crate::error::Error;
use crate::status::{StatusClass, classify};

/// RUN GSM ALGORITHM command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunGsmAlgCommand {
    rand: [u8; RAND_LEN],
}

impl RunGsmAlgCommand {
    /// Run the GSM algorithm over `rand`
    pub const fn new(rand: [u8; RAND_LEN]) -> Self {
        Self { rand }
    }
}

impl ApduCommand for RunGsmAlgCommand {
    /// Number of bytes GET RESPONSE should request
    type Success = u8;
    type Error = Error;

    fn convert_error(error: simauth_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn class(&self) -> u8 {
        cla::GSM
    }

    fn instruction(&self) -> u8 {
        ins::AUTHENTICATE
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.rand[..])
    }

    fn expected_length(&self) -> Option<u8> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<u8, Error> {
        let status = response.status();
        match classify(status) {
            StatusClass::SecurityDenied => Err(Error::SecurityDenied(status)),
            StatusClass::ClaUnsupported => Err(Error::ClaUnsupported(status)),
            _ if status.sw1 == SW1_GSM_BYTES_AVAILABLE => Ok(status.sw2),
            _ => Err(Error::GsmAlgFailed(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_encoding() {
        let cmd = RunGsmAlgCommand::new(hex!("8838c355c878aa572149fe69db686b5a"));
        assert_eq!(
            cmd.to_bytes().unwrap().as_ref(),
            hex!("A0880000108838c355c878aa572149fe69db686b5a")
        );
    }

    #[test]
    fn test_requires_9f() {
        let cmd = RunGsmAlgCommand::new([0u8; RAND_LEN]);
        let ok = cmd.parse_response(Response::from_bytes(&hex!("9F0C")).unwrap());
        assert_eq!(ok.unwrap(), 0x0C);

        let err = cmd
            .parse_response(Response::from_bytes(&hex!("6110")).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::GsmAlgFailed(status) if status.sw1 == 0x61));
    }

    #[test]
    fn test_refusals_keep_their_class() {
        let cmd = RunGsmAlgCommand::new([0u8; RAND_LEN]);
        let parse = |raw: &[u8]| cmd.parse_response(Response::from_bytes(raw).unwrap());

        assert!(matches!(parse(&hex!("9804")), Err(Error::SecurityDenied(_))));
        assert!(matches!(parse(&hex!("6E00")), Err(Error::ClaUnsupported(_))));
    }
}
