//! Transport layer for card communication
//!
//! A transport moves raw bytes to a card and back. It knows nothing about
//! status words or command semantics; one `transmit_raw` call is one
//! command/response exchange.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tracing::{debug, trace};

/// Error type for transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The exchange could not be completed
    #[error("Transmission error: {0}")]
    Transmission(String),

    /// The card or reader did not answer in time
    #[error("Command timed out")]
    Timeout,

    /// Reader or device failure
    #[error("Device error: {0}")]
    Device(String),

    /// No card session is open
    #[error("Not connected")]
    NotConnected,

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Byte-level card transport
pub trait CardTransport: Send + Sync + fmt::Debug {
    /// Send raw bytes to the card and return its full response, status word
    /// included
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Send raw bytes with exchange logging
    #[tracing::instrument(level = "trace", skip(self, command), fields(command = %hex::encode(command)))]
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        let response = self.do_transmit_raw(command)?;
        trace!(response = %hex::encode(&response), "Received response");
        Ok(response)
    }

    /// Whether a card session is currently open
    fn is_connected(&self) -> bool;

    /// Reset the card session
    fn reset(&mut self) -> Result<(), TransportError>;
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<Bytes, TransportError>>,
    commands: Vec<Bytes>,
}

/// Scripted transport for tests
///
/// Answers each command with the next queued response and records every
/// command it receives. The recorded commands stay readable through any
/// clone of the mock, so a test can hand one clone to a session and keep
/// another for assertions.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    connected: bool,
}

impl MockTransport {
    /// Create a connected mock with an empty script
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
            connected: true,
        }
    }

    /// Create a mock that answers with `responses` in order
    pub fn with_responses<I, R>(responses: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Bytes>,
    {
        let mock = Self::new();
        for response in responses {
            mock.push_response(response);
        }
        mock
    }

    /// Queue one response and return the mock
    pub fn with_response(self, response: impl Into<Bytes>) -> Self {
        self.push_response(response);
        self
    }

    /// Queue one response
    pub fn push_response(&self, response: impl Into<Bytes>) {
        self.lock().responses.push_back(Ok(response.into()));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.lock().responses.push_back(Err(error));
    }

    /// Commands received so far, in order
    pub fn commands(&self) -> Vec<Bytes> {
        self.lock().commands.clone()
    }

    /// Number of scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.lock().responses.len()
    }

    /// Mark the mock as disconnected; further transmits fail
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-script
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }

        let mut state = self.lock();
        state.commands.push(Bytes::copy_from_slice(command));
        state.responses.pop_front().unwrap_or_else(|| {
            debug!("Mock transport script exhausted");
            Err(TransportError::Other("no scripted response".to_string()))
        })
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.connected = true;
        Ok(())
    }
}
