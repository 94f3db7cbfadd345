//! Executor for APDU command execution
//!
//! An executor sits on top of a [`CardTransport`] and turns typed commands
//! into responses. The concrete implementation is in the `card` module.

use std::fmt;

use crate::command::ApduCommand;
use crate::error::Error;
use crate::{CardTransport, Response};
use bytes::Bytes;
use tracing::debug;

/// Trait for APDU command execution
pub trait Executor: Send + Sync + fmt::Debug {
    /// The transport type used by this executor
    type Transport: CardTransport;

    /// Get a reference to the underlying transport
    fn transport(&self) -> &Self::Transport;

    /// Get a mutable reference to the underlying transport
    fn transport_mut(&mut self) -> &mut Self::Transport;

    /// Transmit a raw APDU command
    ///
    /// This is the lowest level public transmission method. Exchange bytes
    /// are traced by the transport itself.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        let response = self.do_transmit_raw(command);
        if let Err(err) = &response {
            debug!(
                executor = std::any::type_name::<Self>(),
                error = ?err,
                "Error during raw transmission"
            );
        }
        response
    }

    /// Internal implementation of transmit_raw
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error>;

    /// Execute a typed APDU command and return the command's success type
    ///
    /// Serialization, transport and framing failures are converted through
    /// [`ApduCommand::convert_error`]; everything else is up to the
    /// command's own `parse_response`.
    fn execute<C>(&mut self, command: &C) -> Result<C::Success, C::Error>
    where
        C: ApduCommand,
    {
        let command_bytes = command.to_bytes().map_err(C::convert_error)?;
        let response_bytes = self
            .transmit_raw(&command_bytes)
            .map_err(C::convert_error)?;
        let response = Response::from_bytes(&response_bytes)
            .map_err(|e| C::convert_error(e.with_context("Failed to parse response bytes")))?;

        command.parse_response(response)
    }

    /// Reset the executor, including the transport
    fn reset(&mut self) -> Result<(), Error>;
}
