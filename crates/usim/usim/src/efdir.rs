//! EF_DIR application template records
//!
//! Layout of a record:
//!
//! ```text
//! 61 <len> 4F <aid_len> <RID:5> <app code:2> <rest of AID> [other tags] FF..
//! ```

use std::fmt;

use crate::constants::{USIM_APPLICATION_CODE, tags};
use crate::types::Aid;

/// Minimum record length to hold the fixed header
const HEADER_LEN: usize = 11;

/// One parsed EF_DIR record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfDirEntry<'a> {
    /// Application template tag, `61` when valid
    pub template_tag: u8,
    /// Application template length
    pub template_len: u8,
    /// Application identifier tag, `4F` when valid
    pub id_tag: u8,
    /// AID length
    pub aid_len: u8,
    /// Registered application provider identifier
    pub rid: [u8; 5],
    /// Application code (`10 02` for a 3G USIM)
    pub app_code: [u8; 2],
    /// Bytes following the application code
    pub rest: &'a [u8],
    record: &'a [u8],
}

/// Why a record was skipped during discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfDirReject {
    /// Record shorter than the fixed header
    TooShort(usize),
    /// Template tag is not `61`
    TemplateTag(u8),
    /// Template longer than the record
    TemplateLength(u8),
    /// Identifier tag is not `4F`
    IdTag(u8),
    /// AID length outside 1..=16 or past the record end
    AidLength(u8),
}

impl fmt::Display for EfDirReject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort(len) => write!(f, "record too short ({len} bytes)"),
            Self::TemplateTag(tag) => write!(f, "unexpected application template tag {tag:#04X}"),
            Self::TemplateLength(len) => write!(f, "application template too long ({len})"),
            Self::IdTag(tag) => write!(f, "unexpected application identifier tag {tag:#04X}"),
            Self::AidLength(len) => write!(f, "invalid AID length {len}"),
        }
    }
}

impl<'a> EfDirEntry<'a> {
    /// Parse and validate a record
    pub fn parse(record: &'a [u8]) -> Result<Self, EfDirReject> {
        if record.len() < HEADER_LEN {
            return Err(EfDirReject::TooShort(record.len()));
        }

        let entry = Self {
            template_tag: record[0],
            template_len: record[1],
            id_tag: record[2],
            aid_len: record[3],
            rid: [record[4], record[5], record[6], record[7], record[8]],
            app_code: [record[9], record[10]],
            rest: &record[HEADER_LEN..],
            record,
        };

        if entry.template_tag != tags::APPLICATION_TEMPLATE {
            return Err(EfDirReject::TemplateTag(entry.template_tag));
        }
        if usize::from(entry.template_len) > record.len() - 2 {
            return Err(EfDirReject::TemplateLength(entry.template_len));
        }
        if entry.id_tag != tags::APPLICATION_ID {
            return Err(EfDirReject::IdTag(entry.id_tag));
        }
        let aid_len = usize::from(entry.aid_len);
        if !(1..=Aid::MAX_LEN).contains(&aid_len) || 4 + aid_len > record.len() {
            return Err(EfDirReject::AidLength(entry.aid_len));
        }

        Ok(entry)
    }

    /// Whether this is the 3G USIM application
    pub fn is_usim(&self) -> bool {
        self.app_code == USIM_APPLICATION_CODE
    }

    /// The application identifier bytes
    pub fn aid_bytes(&self) -> &'a [u8] {
        &self.record[4..4 + usize::from(self.aid_len)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const USIM_RECORD: [u8; 38] = hex!(
        "61184F10A0000000871002FF44FF1289000001"
        "0050045553494DFFFFFFFFFFFFFFFFFFFFFFFF"
    );

    #[test]
    fn test_parse_usim_record() {
        let entry = EfDirEntry::parse(&USIM_RECORD).unwrap();
        assert_eq!(entry.rid, hex!("A000000087"));
        assert!(entry.is_usim());
        assert_eq!(entry.aid_bytes(), hex!("A0000000871002FF44FF128900000100"));
    }

    #[test]
    fn test_non_usim_application() {
        // ISIM application code 10 04
        let record = hex!("61124F0CA0000000871004FF49FF0589FFFFFFFFFFFF");
        let entry = EfDirEntry::parse(&record).unwrap();
        assert!(!entry.is_usim());
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            EfDirEntry::parse(&hex!("FFFFFFFF")),
            Err(EfDirReject::TooShort(4))
        );
        assert_eq!(
            EfDirEntry::parse(&[0xFF; 20]),
            Err(EfDirReject::TemplateTag(0xFF))
        );

        let mut record = USIM_RECORD;
        record[1] = 0x30;
        assert_eq!(
            EfDirEntry::parse(&record),
            Err(EfDirReject::TemplateLength(0x30))
        );

        let mut record = USIM_RECORD;
        record[2] = 0x50;
        assert_eq!(EfDirEntry::parse(&record), Err(EfDirReject::IdTag(0x50)));

        let mut record = USIM_RECORD;
        record[3] = 0x00;
        assert_eq!(EfDirEntry::parse(&record), Err(EfDirReject::AidLength(0)));
        record[3] = 0x11;
        assert_eq!(EfDirEntry::parse(&record), Err(EfDirReject::AidLength(0x11)));
    }
}
