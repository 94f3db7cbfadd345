//! GSM challenge-response (RUN GSM ALGORITHM)

use bytes::Bytes;
use simauth_apdu_core::Executor;
use tracing::instrument;

use super::Usim;
use crate::commands::{GetResponseCommand, RunGsmAlgCommand};
use crate::constants::{KC_LEN, RAND_LEN, SRES_LEN, file};
use crate::error::{Error, Result};
use crate::types::{CardMode, FileRef, GsmAuthResult};

impl<E: Executor> Usim<E> {
    /// Run the GSM algorithm over `rand` in DF_GSM
    ///
    /// Always uses GSM commands, whatever the session mode.
    #[instrument(level = "debug", skip_all, err)]
    pub fn gsm_authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<GsmAuthResult> {
        self.select(CardMode::Gsm, &FileRef::Id(file::DF_GSM))?;

        let available = self.executor.execute(&RunGsmAlgCommand::new(*rand))?;
        let raw = self
            .executor
            .execute(&GetResponseCommand::new(CardMode::Gsm, available))?;

        parse_gsm_response(&raw)
    }
}

/// Split a RUN GSM ALGORITHM response (status word included) into SRES and Kc
pub fn parse_gsm_response(raw: &[u8]) -> Result<GsmAuthResult> {
    let payload = &raw[..raw.len().saturating_sub(2)];
    if payload.len() < SRES_LEN + KC_LEN {
        return Err(Error::MalformedGsmResponse(Bytes::copy_from_slice(raw)));
    }

    let mut sres = [0u8; SRES_LEN];
    let mut kc = [0u8; KC_LEN];
    sres.copy_from_slice(&payload[..SRES_LEN]);
    kc.copy_from_slice(&payload[SRES_LEN..SRES_LEN + KC_LEN]);
    Ok(GsmAuthResult::new(sres, kc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_split() {
        let result = parse_gsm_response(&hex!("A1B2C3D4 0011223344556677 9000")).unwrap();
        assert_eq!(result.sres(), &hex!("A1B2C3D4"));
        assert_eq!(result.kc(), &hex!("0011223344556677"));
    }

    #[test]
    fn test_short_payload() {
        // twelve bytes only when the status word is counted
        assert!(matches!(
            parse_gsm_response(&hex!("A1B2C3D4 001122334455 9000")),
            Err(Error::MalformedGsmResponse(_))
        ));
        assert!(parse_gsm_response(&[]).is_err());
    }
}
