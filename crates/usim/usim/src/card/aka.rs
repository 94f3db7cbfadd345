//! UMTS AKA exchange

use bytes::Bytes;
use simauth_apdu_core::Executor;
use tracing::{debug, instrument};

use super::Usim;
use crate::commands::{GetResponseCommand, RunUmtsAlgCommand};
use crate::constants::{
    AUTH_SUCCESS_MIN_LEN, AUTN_LEN, AUTS_LEN, CK_LEN, IK_LEN, RAND_LEN, RES_MAX_LEN, file, tags,
};
use crate::error::{Error, Result};
use crate::types::{AkaKeys, AkaOutcome, Auts, FileRef};

impl<E: Executor> Usim<E> {
    /// Run AKA for `rand`/`autn` in the USIM application
    ///
    /// MF and the USIM application are selected first to anchor the card's
    /// file cursor. A synchronisation failure is an `Ok` outcome.
    #[instrument(level = "debug", skip_all, err)]
    pub fn authenticate(
        &mut self,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<AkaOutcome> {
        let aid = self.discover_aid()?;
        let mode = self.mode;

        self.select(mode, &FileRef::Id(file::MF))?;
        self.select(mode, &FileRef::Aid(aid))?;

        let available = self
            .executor
            .execute(&RunUmtsAlgCommand::new(mode, rand, autn))?;
        let raw = self
            .executor
            .execute(&GetResponseCommand::new(mode, available))?;

        parse_auth_response(&raw)
    }
}

/// Interpret the GET RESPONSE buffer (status word included) of an
/// AUTHENTICATE command
pub fn parse_auth_response(raw: &[u8]) -> Result<AkaOutcome> {
    let malformed = || Error::MalformedAuthResponse(Bytes::copy_from_slice(raw));
    let payload = raw.len().checked_sub(2).map_or(&[][..], |end| &raw[..end]);

    match payload {
        [tags::AUTH_SYNC_FAILURE, len, auts @ ..] if usize::from(*len) == AUTS_LEN => {
            let bytes: [u8; AUTS_LEN] = auts.try_into().map_err(|_| malformed())?;
            let auts = Auts::new(bytes);
            debug!(%auts, "Card reported synchronisation failure");
            Ok(AkaOutcome::SyncFailure(auts))
        }
        [tags::AUTH_SUCCESS, body @ ..] if raw.len() >= AUTH_SUCCESS_MIN_LEN => {
            let keys = parse_success(body).ok_or_else(malformed)?;
            Ok(AkaOutcome::Success(keys))
        }
        [tags::AUTH_SUCCESS, ..] => Err(malformed()),
        _ => Err(Error::UnexpectedAuthResponse(Bytes::copy_from_slice(raw))),
    }
}

/// RES, CK and IK as consecutive length-value fields
fn parse_success(body: &[u8]) -> Option<AkaKeys> {
    let mut fields = LengthValues { rest: body };

    let res = fields.next()?;
    if res.len() > RES_MAX_LEN {
        return None;
    }
    let ck: [u8; CK_LEN] = fields.next()?.try_into().ok()?;
    let ik: [u8; IK_LEN] = fields.next()?.try_into().ok()?;

    Some(AkaKeys::new(res, ck, ik))
}

struct LengthValues<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for LengthValues<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let (&len, rest) = self.rest.split_first()?;
        let len = usize::from(len);
        if rest.len() < len {
            return None;
        }
        let (value, rest) = rest.split_at(len);
        self.rest = rest;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const RES: [u8; 8] = hex!("e55d8827918dacc6");
    const CK: [u8; 16] = hex!("05d3533dfe7be72d42c7bb02f28eda7f");
    const IK: [u8; 16] = hex!("2633a20bdca89d7858ba42478be4d24d");

    fn success_response(res: &[u8], ck: &[u8], ik: &[u8]) -> Vec<u8> {
        let mut raw = vec![tags::AUTH_SUCCESS, res.len() as u8];
        raw.extend_from_slice(res);
        raw.push(ck.len() as u8);
        raw.extend_from_slice(ck);
        raw.push(ik.len() as u8);
        raw.extend_from_slice(ik);
        raw.extend_from_slice(&hex!("9000"));
        raw
    }

    #[test]
    fn test_success() {
        let outcome = parse_auth_response(&success_response(&RES, &CK, &IK)).unwrap();
        let keys = outcome.keys().unwrap();
        assert_eq!(keys.res(), RES);
        assert_eq!(keys.ck(), &CK);
        assert_eq!(keys.ik(), &IK);
    }

    #[test]
    fn test_sync_failure_is_never_success() {
        let auts = hex!("0102030405060708090a0b0c0d0e");
        let mut raw = vec![tags::AUTH_SYNC_FAILURE, 0x0E];
        raw.extend_from_slice(&auts);
        raw.extend_from_slice(&hex!("9000"));

        let outcome = parse_auth_response(&raw).unwrap();
        assert_eq!(outcome.auts().unwrap().as_bytes(), &auts);
        assert!(outcome.keys().is_none());
    }

    #[test]
    fn test_lengths_are_not_repaired() {
        // CK of 15 bytes
        let raw = success_response(&RES, &CK[..15], &IK);
        assert!(matches!(
            parse_auth_response(&raw),
            Err(Error::MalformedAuthResponse(_))
        ));

        // RES of 17 bytes
        let raw = success_response(&[0xAA; 17], &CK, &IK);
        assert!(matches!(
            parse_auth_response(&raw),
            Err(Error::MalformedAuthResponse(_))
        ));

        // IK length byte pointing past the end
        let mut raw = success_response(&RES, &CK, &IK);
        let ik_len_at = 1 + 1 + RES.len() + 1 + CK.len();
        raw[ik_len_at] = 0x20;
        assert!(matches!(
            parse_auth_response(&raw),
            Err(Error::MalformedAuthResponse(_))
        ));
    }

    #[test]
    fn test_auts_length_must_match_declared() {
        // Twelve AUTS bytes; the status word must not fill the gap
        assert!(matches!(
            parse_auth_response(&hex!("DC0E 0102030405060708090a0b0c 9000")),
            Err(Error::MalformedAuthResponse(_))
        ));

        // Fifteen AUTS bytes
        assert!(matches!(
            parse_auth_response(&hex!("DC0E 0102030405060708090a0b0c0d0e0f 9000")),
            Err(Error::MalformedAuthResponse(_))
        ));
    }

    #[test]
    fn test_short_success_is_malformed() {
        assert!(matches!(
            parse_auth_response(&hex!("DB0411223344109000")),
            Err(Error::MalformedAuthResponse(_))
        ));
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            parse_auth_response(&hex!("9000")),
            Err(Error::UnexpectedAuthResponse(_))
        ));
        assert!(matches!(
            parse_auth_response(&hex!("DC0D0102")),
            Err(Error::UnexpectedAuthResponse(_))
        ));
        assert!(matches!(
            parse_auth_response(&[]),
            Err(Error::UnexpectedAuthResponse(_))
        ));
    }
}
