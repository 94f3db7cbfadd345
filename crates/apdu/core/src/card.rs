//! Card executor implementation

use bytes::Bytes;

use crate::error::{Error, ResultExt};
use crate::executor::Executor;
use crate::transport::CardTransport;

/// Executor that sends commands straight to a transport
#[derive(Debug)]
pub struct CardExecutor<T: CardTransport> {
    transport: T,
}

impl<T: CardTransport> CardExecutor<T> {
    /// Create a new card executor with the given transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: CardTransport> Executor for CardExecutor<T> {
    type Transport = T;

    fn transport(&self) -> &T {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        self.transport
            .transmit_raw(command)
            .context("Transport error")
    }

    fn reset(&mut self) -> Result<(), Error> {
        self.transport
            .reset()
            .context("Failed to reset transport")
    }
}
