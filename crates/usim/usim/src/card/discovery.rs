//! USIM application discovery through EF_DIR

use bytes::Bytes;
use simauth_apdu_core::Executor;
use tracing::{debug, instrument};

use super::Usim;
use crate::constants::{EF_DIR_MAX_RECORDS, file};
use crate::efdir::EfDirEntry;
use crate::error::{Error, Result};
use crate::types::{Aid, CardMode, FileRef};

impl<E: Executor> Usim<E> {
    /// AID of the 3G USIM application
    ///
    /// Walks EF_DIR records 1 to 9 under the USIM class and stops at the
    /// first record with application code `10 02`. Records that cannot be
    /// read or parsed are skipped. The AID is cached for the session.
    #[instrument(level = "debug", skip(self), err)]
    pub fn discover_aid(&mut self) -> Result<Aid> {
        if let Some(aid) = &self.aid {
            return Ok(aid.clone());
        }

        let mode = CardMode::Usim;
        self.select(mode, &FileRef::Id(file::MF))?;
        self.select(mode, &FileRef::Id(file::EF_DIR))?;

        for number in 1..=EF_DIR_MAX_RECORDS {
            let record = match self
                .read_record_length(mode, number)
                .and_then(|length| self.read_record(mode, number, length))
            {
                Ok(record) => record,
                Err(err) if err.is_card_status() => {
                    debug!(record = number, error = %err, "Skipping unreadable EF_DIR record");
                    continue;
                }
                Err(err) => return Err(err),
            };

            match EfDirEntry::parse(&record) {
                Ok(entry) if entry.is_usim() => {
                    let aid = Aid::new(Bytes::copy_from_slice(entry.aid_bytes()))?;
                    debug!(record = number, %aid, "Found USIM application");
                    self.aid = Some(aid.clone());
                    return Ok(aid);
                }
                Ok(entry) => {
                    debug!(
                        record = number,
                        app_code = %hex::encode(entry.app_code),
                        "Skipping non-USIM application"
                    );
                }
                Err(reason) => {
                    debug!(record = number, %reason, "Skipping EF_DIR record");
                }
            }
        }

        Err(Error::AidNotFound)
    }
}
