//! Status word classification
//!
//! Every response is mapped through one closed table. The first matching
//! row wins; anything unmatched is [`StatusClass::Other`].

use simauth_apdu_core::StatusWord;
use simauth_apdu_core::response::status::common::{
    AUTH_MAC_MISMATCH, GSM_SECURITY_NOT_SATISFIED, SUCCESS, SW1_BYTES_AVAILABLE,
    SW1_CLA_NOT_SUPPORTED, SW1_GSM_BYTES_AVAILABLE, SW1_PROACTIVE_PENDING, SW1_WRONG_LE,
    SW1_WRONG_LENGTH,
};

/// Outcome class of a status word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `90 00`, or `91 xx` (proactive command pending)
    Success,
    /// Response bytes available; the value is the GET RESPONSE length
    MoreData(u8),
    /// `98 04`: security status not satisfied
    SecurityDenied,
    /// `98 62`: AUTN rejected by the card
    MacMismatch,
    /// `6E xx`: class byte not supported
    ClaUnsupported,
    /// `67 xx`: wrong length; the value is SW2
    WrongLength(u8),
    /// Anything else
    Other,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(StatusWord),
    Sw1(u8),
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Success,
    MoreData,
    SecurityDenied,
    MacMismatch,
    ClaUnsupported,
    WrongLength,
}

const STATUS_TABLE: &[(Pattern, Outcome)] = &[
    (Pattern::Exact(SUCCESS), Outcome::Success),
    (Pattern::Exact(GSM_SECURITY_NOT_SATISFIED), Outcome::SecurityDenied),
    (Pattern::Exact(AUTH_MAC_MISMATCH), Outcome::MacMismatch),
    (Pattern::Sw1(SW1_BYTES_AVAILABLE), Outcome::MoreData),
    (Pattern::Sw1(SW1_WRONG_LE), Outcome::MoreData),
    (Pattern::Sw1(SW1_GSM_BYTES_AVAILABLE), Outcome::MoreData),
    (Pattern::Sw1(SW1_PROACTIVE_PENDING), Outcome::Success),
    (Pattern::Sw1(SW1_CLA_NOT_SUPPORTED), Outcome::ClaUnsupported),
    (Pattern::Sw1(SW1_WRONG_LENGTH), Outcome::WrongLength),
];

impl Pattern {
    const fn matches(self, status: StatusWord) -> bool {
        match self {
            Self::Exact(exact) => status.sw1 == exact.sw1 && status.sw2 == exact.sw2,
            Self::Sw1(sw1) => status.sw1 == sw1,
        }
    }
}

/// Classify a status word
pub fn classify(status: StatusWord) -> StatusClass {
    STATUS_TABLE
        .iter()
        .find(|(pattern, _)| pattern.matches(status))
        .map_or(StatusClass::Other, |(_, outcome)| match outcome {
            Outcome::Success => StatusClass::Success,
            Outcome::MoreData => StatusClass::MoreData(status.sw2),
            Outcome::SecurityDenied => StatusClass::SecurityDenied,
            Outcome::MacMismatch => StatusClass::MacMismatch,
            Outcome::ClaUnsupported => StatusClass::ClaUnsupported,
            Outcome::WrongLength => StatusClass::WrongLength(status.sw2),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(sw1: u8, sw2: u8) -> StatusClass {
        classify(StatusWord::new(sw1, sw2))
    }

    #[test]
    fn test_more_data_variants() {
        assert_eq!(class(0x61, 0x22), StatusClass::MoreData(0x22));
        assert_eq!(class(0x6C, 0x0F), StatusClass::MoreData(0x0F));
        assert_eq!(class(0x9F, 0x17), StatusClass::MoreData(0x17));
    }

    #[test]
    fn test_refusals() {
        assert_eq!(class(0x98, 0x04), StatusClass::SecurityDenied);
        assert_eq!(class(0x98, 0x62), StatusClass::MacMismatch);
        assert_eq!(class(0x6E, 0x00), StatusClass::ClaUnsupported);
        assert_eq!(class(0x6E, 0x42), StatusClass::ClaUnsupported);
    }

    #[test]
    fn test_success_and_other() {
        assert_eq!(class(0x90, 0x00), StatusClass::Success);
        assert_eq!(class(0x91, 0x10), StatusClass::Success);
        assert_eq!(class(0x67, 0x1C), StatusClass::WrongLength(0x1C));
        assert_eq!(class(0x6A, 0x82), StatusClass::Other);
        assert_eq!(class(0x98, 0x40), StatusClass::Other);
        assert_eq!(class(0x90, 0x01), StatusClass::Other);
    }
}
