//! RAND/AUTN challenge pairs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::{AUTN_LEN, RAND_LEN};
use crate::validation::{ValidationError, ValidationResult, parse_hex_array};

/// Authentication challenge: RAND and AUTN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    /// Random challenge
    pub rand: [u8; RAND_LEN],
    /// Authentication token
    pub autn: [u8; AUTN_LEN],
}

impl Challenge {
    /// Create a challenge
    pub const fn new(rand: [u8; RAND_LEN], autn: [u8; AUTN_LEN]) -> Self {
        Self { rand, autn }
    }

    /// Parse RAND and AUTN from 32-character hex strings
    pub fn from_hex(rand: &str, autn: &str) -> ValidationResult<Self> {
        Ok(Self {
            rand: parse_hex_array("RAND", rand)?,
            autn: parse_hex_array("AUTN", autn)?,
        })
    }

    /// Parse a RAND on its own, for GSM runs
    pub fn rand_from_hex(rand: &str) -> ValidationResult<[u8; RAND_LEN]> {
        parse_hex_array("RAND", rand)
    }

    /// Split a base64 blob holding `RAND || AUTN`
    pub fn from_base64(blob: &str) -> ValidationResult<Self> {
        let field = "RAND||AUTN";
        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|_| ValidationError::InvalidCharacters { field })?;

        if bytes.len() != RAND_LEN + AUTN_LEN {
            return Err(ValidationError::IncorrectLength {
                field,
                expected: RAND_LEN + AUTN_LEN,
                actual: bytes.len(),
            });
        }

        let mut rand = [0u8; RAND_LEN];
        let mut autn = [0u8; AUTN_LEN];
        rand.copy_from_slice(&bytes[..RAND_LEN]);
        autn.copy_from_slice(&bytes[RAND_LEN..]);
        Ok(Self { rand, autn })
    }

    /// Encode as a base64 `RAND || AUTN` blob
    pub fn to_base64(&self) -> String {
        let mut bytes = [0u8; RAND_LEN + AUTN_LEN];
        bytes[..RAND_LEN].copy_from_slice(&self.rand);
        bytes[RAND_LEN..].copy_from_slice(&self.autn);
        STANDARD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_from_hex() {
        let challenge = Challenge::from_hex(
            "8838c355c878aa572149fe69db686b5a",
            "d744519b25aa800084ba37b0f6734dd1",
        )
        .unwrap();
        assert_eq!(challenge.rand, hex!("8838c355c878aa572149fe69db686b5a"));
        assert_eq!(challenge.autn, hex!("d744519b25aa800084ba37b0f6734dd1"));

        assert!(matches!(
            Challenge::from_hex("8838", "d744519b25aa800084ba37b0f6734dd1"),
            Err(ValidationError::IncorrectLength { field: "RAND", .. })
        ));
    }

    #[test]
    fn test_base64_blob() {
        let challenge = Challenge::new(
            hex!("8838c355c878aa572149fe69db686b5a"),
            hex!("d744519b25aa800084ba37b0f6734dd1"),
        );
        let blob = challenge.to_base64();
        assert_eq!(Challenge::from_base64(&blob).unwrap(), challenge);

        let short = STANDARD.encode([0u8; 20]);
        assert!(matches!(
            Challenge::from_base64(&short),
            Err(ValidationError::IncorrectLength { actual: 20, .. })
        ));
        assert!(Challenge::from_base64("not base64!").is_err());
    }
}
