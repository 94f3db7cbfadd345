//! IMSI, ICCID and MSISDN retrieval

use bytes::Bytes;
use simauth_apdu_core::Executor;
use tracing::{debug, instrument, warn};

use super::Usim;
use crate::constants::{MSISDN_FALLBACK_AID, file};
use crate::error::{Error, Result};
use crate::identity::{Identity, Plmn, decode_iccid, decode_imsi, decode_msisdn};
use crate::types::{Aid, CardMode, FileRef};

impl<E: Executor> Usim<E> {
    /// Settle the card mode by selecting MF under the USIM class
    ///
    /// A card that refuses the USIM class is driven with GSM commands for
    /// the rest of the session. Transport failures do not change the mode.
    fn detect_mode(&mut self) -> Result<CardMode> {
        if self.mode == CardMode::Usim {
            match self.select(CardMode::Usim, &FileRef::Id(file::MF)) {
                Ok(_) => {}
                Err(err) if err.is_card_status() => {
                    debug!(error = %err, "USIM selection refused, falling back to GSM");
                    self.mode = CardMode::Gsm;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(self.mode)
    }

    /// IMSI digits from EF_IMSI
    #[instrument(level = "debug", skip(self), err)]
    pub fn imsi(&mut self) -> Result<String> {
        let mode = self.detect_mode()?;
        let fcp = match mode {
            CardMode::Usim => {
                let aid = self.discover_aid()?;
                self.select(mode, &FileRef::Aid(aid))?;
                self.select(mode, &FileRef::Id(file::EF_IMSI))?
            }
            CardMode::Gsm => {
                self.select(mode, &FileRef::Id(file::MF))?;
                self.select(mode, &FileRef::Id(file::DF_GSM))?;
                self.select(mode, &FileRef::Id(file::EF_IMSI))?
            }
        };

        let content = self.read_transparent(mode, &fcp)?;
        decode_imsi(&content)
    }

    /// ICCID digits from EF_ICCID, parity nibble included
    #[instrument(level = "debug", skip(self), err)]
    pub fn iccid(&mut self) -> Result<String> {
        let mode = self.mode;
        self.select(mode, &FileRef::Id(file::MF))?;
        let fcp = self.select(mode, &FileRef::Id(file::EF_ICCID))?;
        let content = self.read_transparent(mode, &fcp)?;
        Ok(decode_iccid(&content))
    }

    /// MSISDN from record 1 of EF_MSISDN, `None` when unprovisioned
    ///
    /// EF_MSISDN is looked up under DF_TELECOM first, then under the
    /// well-known USIM application. When both fail, the DF_TELECOM error is
    /// returned.
    #[instrument(level = "debug", skip(self), err)]
    pub fn msisdn(&mut self) -> Result<Option<String>> {
        let mode = self.mode;
        if let Err(err) = self.select_path(mode, &[file::MF, file::DF_TELECOM, file::EF_MSISDN]) {
            debug!(error = %err, "EF_MSISDN not under DF_TELECOM, trying USIM application");
            if let Err(alternate) = self.select_msisdn_alternate(mode) {
                debug!(error = %alternate, "Alternate EF_MSISDN path failed");
                return Err(err);
            }
        }

        let length = self.read_record_length(mode, 1)?;
        let record = self.read_record(mode, 1, length)?;
        decode_msisdn(&record)
    }

    /// Identity of the card; cached for the session
    ///
    /// MSISDN is best effort: a card without a readable EF_MSISDN still has
    /// an identity.
    pub fn identity(&mut self) -> Result<Identity> {
        if let Some(identity) = &self.identity {
            return Ok(identity.clone());
        }

        let imsi = self.imsi()?;
        let plmn = Plmn::from_imsi(&imsi)
            .map_err(|_| Error::MalformedImsi(Bytes::copy_from_slice(imsi.as_bytes())))?;
        let iccid = self.iccid()?;
        let msisdn = self.msisdn().unwrap_or_else(|err| {
            warn!(error = %err, "MSISDN unavailable");
            None
        });

        let identity = Identity {
            imsi,
            iccid: Some(iccid),
            msisdn,
            imei: None,
            plmn,
        };
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    fn select_path(&mut self, mode: CardMode, path: &[u16]) -> Result<()> {
        for &id in path {
            self.select(mode, &FileRef::Id(id))?;
        }
        Ok(())
    }

    fn select_msisdn_alternate(&mut self, mode: CardMode) -> Result<()> {
        let aid = Aid::new(Bytes::from_static(&MSISDN_FALLBACK_AID))?;
        self.select(mode, &FileRef::Id(file::MF))?;
        self.select(mode, &FileRef::Aid(aid))?;
        self.select(mode, &FileRef::Id(file::EF_MSISDN))?;
        Ok(())
    }
}
