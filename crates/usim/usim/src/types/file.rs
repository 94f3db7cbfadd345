//! Card modes and file addressing

use std::fmt;

use bytes::Bytes;

use crate::constants::cla;
use crate::error::{Error, Result};

/// Command set a card is addressed with
///
/// A session starts in [`CardMode::Usim`] and drops to [`CardMode::Gsm`]
/// when the card rejects USIM selection; it stays there for the rest of the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum CardMode {
    /// GSM 11.11 commands, class `A0`
    #[display("GSM")]
    Gsm,
    /// UICC/USIM commands, class `00`
    #[default]
    #[display("USIM")]
    Usim,
}

impl CardMode {
    /// Class byte for this mode
    pub const fn cla(self) -> u8 {
        match self {
            Self::Gsm => cla::GSM,
            Self::Usim => cla::USIM,
        }
    }
}

/// Application identifier, 1 to 16 bytes
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Aid(Bytes);

impl Aid {
    /// Maximum AID length
    pub const MAX_LEN: usize = 16;

    /// Create an AID, checking its length
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() || bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidAid(bytes));
        }
        Ok(Self(bytes))
    }

    /// AID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aid({})", hex::encode_upper(&self.0))
    }
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}

impl AsRef<[u8]> for Aid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Selection target: a file identifier or an application identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// Two-byte file identifier
    Id(u16),
    /// Application identifier
    Aid(Aid),
}

impl From<u16> for FileRef {
    fn from(id: u16) -> Self {
        Self::Id(id)
    }
}

impl From<Aid> for FileRef {
    fn from(aid: Aid) -> Self {
        Self::Aid(aid)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id:04X}"),
            Self::Aid(aid) => write!(f, "AID {aid}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_mode_class() {
        assert_eq!(CardMode::Gsm.cla(), 0xA0);
        assert_eq!(CardMode::Usim.cla(), 0x00);
        assert_eq!(CardMode::default(), CardMode::Usim);
        assert_eq!(CardMode::Gsm.to_string(), "GSM");
    }

    #[test]
    fn test_aid_length_bounds() {
        assert!(Aid::new(Bytes::new()).is_err());
        assert!(Aid::new(vec![0u8; 17]).is_err());

        let aid = Aid::new(hex!("A0000000871002FF").to_vec()).unwrap();
        assert_eq!(aid.to_string(), "A0000000871002FF");
        assert_eq!(FileRef::from(aid).to_string(), "AID A0000000871002FF");
        assert_eq!(FileRef::from(0x6F07).to_string(), "6F07");
    }
}
