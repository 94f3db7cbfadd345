//! Status word handling
//!
//! The two trailing bytes of every response APDU. Interpretation of most
//! values is application specific; only the ISO/IEC 7816-4 and GSM 11.11
//! values used across SIM/USIM applications are named here.

use std::fmt;

/// Status word (SW1, SW2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte
    pub sw1: u8,
    /// Second status byte
    pub sw2: u8,
}

impl StatusWord {
    /// Create a status word from its two bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Status word as a big-endian 16-bit value
    pub const fn to_u16(self) -> u16 {
        ((self.sw1 as u16) << 8) | self.sw2 as u16
    }

    /// Whether this is `90 00`
    pub const fn is_success(self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }
}

impl From<u16> for StatusWord {
    fn from(value: u16) -> Self {
        Self::new((value >> 8) as u8, value as u8)
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from((sw1, sw2): (u8, u8)) -> Self {
        Self::new(sw1, sw2)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}", self.sw1, self.sw2)
    }
}

/// Commonly used status words
pub mod common {
    use super::StatusWord;

    /// Normal processing
    pub const SUCCESS: StatusWord = StatusWord::new(0x90, 0x00);
    /// Security status not satisfied (GSM 11.11)
    pub const GSM_SECURITY_NOT_SATISFIED: StatusWord = StatusWord::new(0x98, 0x04);
    /// Authentication error, incorrect MAC (TS 31.102)
    pub const AUTH_MAC_MISMATCH: StatusWord = StatusWord::new(0x98, 0x62);

    /// SW1 for "response bytes available" (ISO/IEC 7816-4)
    pub const SW1_BYTES_AVAILABLE: u8 = 0x61;
    /// SW1 for "wrong Le; SW2 holds the exact length"
    pub const SW1_WRONG_LE: u8 = 0x6C;
    /// SW1 for "wrong length"; SW2 may hold the exact length
    pub const SW1_WRONG_LENGTH: u8 = 0x67;
    /// SW1 for "response bytes available" (GSM 11.11)
    pub const SW1_GSM_BYTES_AVAILABLE: u8 = 0x9F;
    /// SW1 for "class not supported"
    pub const SW1_CLA_NOT_SUPPORTED: u8 = 0x6E;
    /// SW1 for "normal ending, proactive command pending" (TS 102 221)
    pub const SW1_PROACTIVE_PENDING: u8 = 0x91;
}
