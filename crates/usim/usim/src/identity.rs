//! Subscriber identity values and their BCD encodings

use bytes::Bytes;

use crate::constants::MSISDN_ALPHA_LEN;
use crate::error::{Error, Result};
use crate::validation::{ValidationError, ValidationResult, validate_digits};

/// Number of digits in an IMSI or IMEI
pub const NUMERAL_DIGITS: usize = 15;

/// MCCs whose networks use three-digit MNCs
const THREE_DIGIT_MNC_MCCS: [&str; 5] = ["310", "311", "312", "313", "316"];

/// Subscriber identity as read from a card or configured on a software card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// IMSI digits
    pub imsi: String,
    /// ICCID digits, absent on software cards
    pub iccid: Option<String>,
    /// MSISDN digits, when provisioned
    pub msisdn: Option<String>,
    /// IMEI of the host device, when known
    pub imei: Option<String>,
    /// Home network derived from the IMSI
    pub plmn: Plmn,
}

/// Mobile country and network codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plmn {
    /// Mobile country code, three digits
    pub mcc: String,
    /// Mobile network code, two or three digits
    pub mnc: String,
}

impl Plmn {
    /// Split the leading MCC and MNC off an IMSI
    pub fn from_imsi(imsi: &str) -> ValidationResult<Self> {
        let mcc = imsi.get(..3).ok_or(ValidationError::IncorrectLength {
            field: "IMSI",
            expected: NUMERAL_DIGITS,
            actual: imsi.len(),
        })?;
        let mnc_len = if THREE_DIGIT_MNC_MCCS.contains(&mcc) { 3 } else { 2 };
        let mnc = imsi.get(3..3 + mnc_len).ok_or(ValidationError::IncorrectLength {
            field: "IMSI",
            expected: NUMERAL_DIGITS,
            actual: imsi.len(),
        })?;

        if !imsi[..3 + mnc_len].bytes().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCharacters { field: "IMSI" });
        }

        Ok(Self {
            mcc: mcc.to_string(),
            mnc: mnc.to_string(),
        })
    }

    /// BCD-encoded MCC and MNC
    pub fn encode(&self) -> ValidationResult<(u16, u16)> {
        encode_mcc_mnc(&self.mcc, &self.mnc)
    }
}

/// Encode MCC and MNC as BCD nibbles padded with `F`
///
/// `("001", "466")` gives `(0xF001, 0xF466)`; a two-digit MNC `"93"` gives
/// `0xFF93`.
pub fn encode_mcc_mnc(mcc: &str, mnc: &str) -> ValidationResult<(u16, u16)> {
    let mcc = match mcc.len() {
        3 => 0xF000 | bcd(validate_digits("MCC", mcc, 3)?),
        actual => {
            return Err(ValidationError::IncorrectLength {
                field: "MCC",
                expected: 3,
                actual,
            });
        }
    };

    let mnc = match mnc.len() {
        3 => 0xF000 | bcd(validate_digits("MNC", mnc, 3)?),
        2 => 0xFF00 | bcd(validate_digits("MNC", mnc, 2)?),
        actual => {
            return Err(ValidationError::IncorrectLength {
                field: "MNC",
                expected: 3,
                actual,
            });
        }
    };

    Ok((mcc, mnc))
}

fn bcd(digits: &str) -> u16 {
    digits
        .bytes()
        .fold(0, |acc, d| (acc << 4) | u16::from(d - b'0'))
}

/// Parse a 15-digit IMSI or IMEI into its numeric value
pub fn parse_numeral(field: &'static str, digits: &str) -> ValidationResult<u64> {
    validate_digits(field, digits, NUMERAL_DIGITS)?
        .parse()
        .map_err(|_| ValidationError::InvalidCharacters { field })
}

/// Format a numeric IMSI or IMEI back into 15 digits
pub fn format_numeral(value: u64) -> String {
    format!("{value:0width$}", width = NUMERAL_DIGITS)
}

/// Swap the nibbles of every byte (BCD digit order on SIM files)
pub fn swap_nibbles(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b.rotate_left(4)).collect()
}

/// Decode EF_IMSI content
///
/// The first byte is the length and the first nibble of the second byte is
/// the parity, so three hex digits are dropped after swapping.
pub(crate) fn decode_imsi(content: &[u8]) -> Result<String> {
    let digits = hex::encode(swap_nibbles(content));
    match digits.get(3..) {
        Some(imsi) if !imsi.is_empty() => Ok(imsi.trim_end_matches('f').to_string()),
        _ => Err(Error::MalformedImsi(Bytes::copy_from_slice(content))),
    }
}

/// Decode EF_ICCID content; the parity nibble is kept
pub(crate) fn decode_iccid(content: &[u8]) -> String {
    hex::encode(swap_nibbles(content))
}

/// Decode record 1 of EF_MSISDN
///
/// Returns `None` for an unprovisioned record (length byte `FF`).
pub(crate) fn decode_msisdn(record: &[u8]) -> Result<Option<String>> {
    let malformed = || Error::MalformedMsisdn(Bytes::copy_from_slice(record));

    if record.len() < MSISDN_ALPHA_LEN + 2 {
        return Err(malformed());
    }

    let number = &record[MSISDN_ALPHA_LEN..];
    let bcd_len = number[0];
    if bcd_len == 0xFF {
        return Ok(None);
    }

    let digits = hex::encode(swap_nibbles(&number[2..]));
    let count = usize::from(bcd_len)
        .checked_sub(2)
        .map(|n| n * 2 + 1)
        .ok_or_else(malformed)?;

    digits
        .get(..count)
        .map(|msisdn| Some(msisdn.to_string()))
        .ok_or_else(malformed)
}
