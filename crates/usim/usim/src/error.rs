//! Error types for SIM/USIM operations

use bytes::Bytes;
use simauth_apdu_core::{StatusWord, TransportError};

use crate::validation::ValidationError;

/// Result type for SIM/USIM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Closed classification of every [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    /// I/O failure below the protocol
    Transport,
    /// The transport gave up waiting for the card
    Timeout,
    /// Unexpected status word or response length
    ProtocolViolation,
    /// The card refused the operation
    SecurityDenied,
    /// The card or software card rejected AUTN
    AuthenticationMacMismatch,
    /// TLV, record or length inconsistency in card data
    MalformedData,
    /// A tag, record or application was not present
    NotFound,
    /// Host-supplied input was rejected
    InvalidInput,
}

/// Error type for SIM/USIM operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// APDU layer errors, transport failures included
    #[error(transparent)]
    Apdu(#[from] simauth_apdu_core::Error),

    /// `98 04`
    #[error("Security status not satisfied ({0})")]
    SecurityDenied(StatusWord),

    /// `6E xx`; the operation may succeed under the other card mode
    #[error("Class byte not supported ({0})")]
    ClaUnsupported(StatusWord),

    /// Status word not allowed at this step
    #[error("Unexpected status {status} in response to {command}")]
    ProtocolViolation {
        /// Command that got the response
        command: &'static str,
        /// Status word received
        status: StatusWord,
    },

    /// Response length not allowed at this step
    #[error("Unexpected response length {actual} to {command}")]
    UnexpectedLength {
        /// Command that got the response
        command: &'static str,
        /// Raw response length, status word included
        actual: usize,
    },

    /// AUTN rejected: MAC != XMAC
    #[error("Authentication failed: MAC mismatch")]
    MacMismatch,

    /// Buffer is not a well-formed FCP template
    #[error("Malformed FCP template: {}", hex::encode(.0))]
    MalformedFcp(Bytes),

    /// FCP template lacks the requested tag
    #[error("Tag {0:#04X} not found in FCP template")]
    FcpTagNotFound(u8),

    /// Read response with the wrong length or a status other than `90 00`
    #[error("Malformed read response (expected {expected} bytes + 9000): {}", hex::encode(.raw))]
    MalformedRead {
        /// Declared length
        expected: usize,
        /// Raw response
        raw: Bytes,
    },

    /// File size does not fit a short READ BINARY
    #[error("File of {0} bytes is too large for a single read")]
    FileTooLarge(usize),

    /// AID outside 1..=16 bytes
    #[error("Invalid AID length {}: {}", .0.len(), hex::encode(.0))]
    InvalidAid(Bytes),

    /// No 3G USIM application in EF_DIR
    #[error("USIM application not found in EF_DIR")]
    AidNotFound,

    /// EF_IMSI content cannot be decoded
    #[error("Malformed IMSI: {}", hex::encode(.0))]
    MalformedImsi(Bytes),

    /// EF_MSISDN record cannot be decoded
    #[error("Malformed MSISDN record: {}", hex::encode(.0))]
    MalformedMsisdn(Bytes),

    /// AUTHENTICATE response with a known tag but inconsistent lengths
    #[error("Malformed AUTHENTICATE response: {}", hex::encode(.0))]
    MalformedAuthResponse(Bytes),

    /// AUTHENTICATE response with an unknown tag
    #[error("Unexpected AUTHENTICATE response: {}", hex::encode(.0))]
    UnexpectedAuthResponse(Bytes),

    /// RUN GSM ALGORITHM answered without `9F xx`
    #[error("RUN GSM ALGORITHM failed ({0})")]
    GsmAlgFailed(StatusWord),

    /// RUN GSM ALGORITHM response shorter than SRES + Kc
    #[error("Malformed RUN GSM ALGORITHM response: {}", hex::encode(.0))]
    MalformedGsmResponse(Bytes),

    /// Host input validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Apdu(err) => match err.as_transport() {
                Some(TransportError::Timeout) => ErrorKind::Timeout,
                Some(_) => ErrorKind::Transport,
                None => ErrorKind::ProtocolViolation,
            },
            Self::SecurityDenied(_) | Self::ClaUnsupported(_) => ErrorKind::SecurityDenied,
            Self::ProtocolViolation { .. }
            | Self::UnexpectedLength { .. }
            | Self::UnexpectedAuthResponse(_)
            | Self::GsmAlgFailed(_) => ErrorKind::ProtocolViolation,
            Self::MacMismatch => ErrorKind::AuthenticationMacMismatch,
            Self::MalformedFcp(_)
            | Self::MalformedRead { .. }
            | Self::FileTooLarge(_)
            | Self::InvalidAid(_)
            | Self::MalformedImsi(_)
            | Self::MalformedMsisdn(_)
            | Self::MalformedAuthResponse(_)
            | Self::MalformedGsmResponse(_) => ErrorKind::MalformedData,
            Self::FcpTagNotFound(_) | Self::AidNotFound => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::InvalidInput,
        }
    }

    /// Status word carried by this error, if it stems from one
    pub const fn status(&self) -> Option<StatusWord> {
        match self {
            Self::SecurityDenied(status)
            | Self::ClaUnsupported(status)
            | Self::GsmAlgFailed(status)
            | Self::ProtocolViolation { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the card answered with a status, as opposed to failing below
    /// the protocol
    pub fn is_card_status(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Transport | ErrorKind::Timeout)
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Self::Apdu(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::from(TransportError::Timeout).kind(), ErrorKind::Timeout);
        assert_eq!(
            Error::from(TransportError::NotConnected).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            Error::Apdu(simauth_apdu_core::Error::InvalidResponseLength(1)).kind(),
            ErrorKind::ProtocolViolation
        );
        assert_eq!(
            Error::ClaUnsupported(StatusWord::new(0x6E, 0x00)).kind(),
            ErrorKind::SecurityDenied
        );
        assert_eq!(Error::AidNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::MalformedMsisdn(Bytes::new()).kind(),
            ErrorKind::MalformedData
        );
    }

    #[test]
    fn test_status_is_carried() {
        let err = Error::ProtocolViolation {
            command: "SELECT",
            status: StatusWord::new(0x6A, 0x82),
        };
        assert_eq!(err.status(), Some(StatusWord::new(0x6A, 0x82)));
        assert_eq!(err.to_string(), "Unexpected status 6A82 in response to SELECT");
        assert!(Error::MacMismatch.status().is_none());
    }
}
