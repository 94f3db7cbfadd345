//! PC/SC transport implementation

use simauth_apdu_core::prelude::*;

use pcsc::{Card, Context, Disposition, MAX_BUFFER_SIZE};
use std::{ffi::CString, fmt};
use tracing::{debug, warn};

use crate::{config::PcscConfig, error::PcscError};

/// Transport implementation using PC/SC
pub struct PcscTransport {
    context: Context,
    card: Option<Card>,
    reader_name: String,
    config: PcscConfig,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("reader_name", &self.reader_name)
            .field("has_card", &self.card.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl PcscTransport {
    /// Create a transport for the specified reader and try to connect
    ///
    /// A missing card is not an error here; the connection is retried on
    /// the first transmit.
    pub(crate) fn new(
        context: Context,
        reader_name: &str,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let mut transport = Self {
            context,
            card: None,
            reader_name: reader_name.to_string(),
            config,
        };

        match transport.connect_card() {
            Ok(()) | Err(PcscError::NoCard(_)) => Ok(transport),
            Err(e) => Err(e),
        }
    }

    fn connect_card(&mut self) -> Result<(), PcscError> {
        if self.card.is_some() {
            return Ok(());
        }

        let reader_cstr = CString::new(self.reader_name.clone())
            .map_err(|_| PcscError::ReaderNotFound(self.reader_name.clone()))?;

        match self.context.connect(
            &reader_cstr,
            self.config.share_mode.into(),
            self.config.protocols,
        ) {
            Ok(card) => {
                debug!(reader = %self.reader_name, "Connected to card");
                self.card = Some(card);
                Ok(())
            }
            Err(pcsc::Error::NoSmartcard) => Err(PcscError::NoCard(self.reader_name.clone())),
            Err(pcsc::Error::UnknownReader) => {
                Err(PcscError::ReaderNotFound(self.reader_name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the ATR of the current card
    pub fn atr(&self) -> Result<Vec<u8>, PcscError> {
        self.card.as_ref().map_or_else(
            || Err(PcscError::NoCard(self.reader_name.clone())),
            |card| {
                card.get_attribute_owned(pcsc::Attribute::AtrString)
                    .map_err(Into::into)
            },
        )
    }

    /// Get the reader name
    pub fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn transmit_command(&mut self, command: &[u8], retry: bool) -> Result<Bytes, PcscError> {
        self.connect_card()?;

        let card = self
            .card
            .as_mut()
            .ok_or_else(|| PcscError::NoCard(self.reader_name.clone()))?;

        let mut response_buffer = [0u8; MAX_BUFFER_SIZE];
        match card.transmit(command, &mut response_buffer) {
            Ok(response) => Ok(Bytes::copy_from_slice(response)),
            Err(e) => {
                if matches!(e, pcsc::Error::ResetCard | pcsc::Error::RemovedCard) {
                    self.card = None;

                    if retry && self.config.auto_reconnect && e == pcsc::Error::ResetCard {
                        warn!(reader = %self.reader_name, "Card was reset, reconnecting");
                        return self.transmit_command(command, false);
                    }
                }

                Err(e.into())
            }
        }
    }
}

impl CardTransport for PcscTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.transmit_command(command, true)
            .map_err(TransportError::from)
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        if let Some(card) = self.card.take() {
            if let Err((_, e)) = card.disconnect(Disposition::ResetCard) {
                debug!(error = %e, "Card disconnect on reset failed");
            }
        }

        self.connect_card().map_err(Into::into)
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            let _ = card.disconnect(Disposition::LeaveCard);
        }
    }
}
