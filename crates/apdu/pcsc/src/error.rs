//! Error types for PC/SC transport

use simauth_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    #[error("No readers available")]
    NoReadersAvailable,

    /// Reader not found
    #[error("Reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in reader
    #[error("No card present in reader: {0}")]
    NoCard(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(pcsc::Error::Timeout) => Self::Timeout,
            PcscError::Pcsc(
                e @ (pcsc::Error::ResetCard
                | pcsc::Error::RemovedCard
                | pcsc::Error::NoSmartcard
                | pcsc::Error::UnpoweredCard
                | pcsc::Error::UnresponsiveCard),
            ) => Self::Transmission(e.to_string()),
            PcscError::Pcsc(e) => Self::Device(e.to_string()),
            PcscError::NoCard(_) => Self::NotConnected,
            PcscError::NoReadersAvailable | PcscError::ReaderNotFound(_) => {
                Self::Device(error.to_string())
            }
            PcscError::Other(msg) => Self::Other(msg),
        }
    }
}
