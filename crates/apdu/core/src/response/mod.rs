//! APDU response definitions
//!
//! A response APDU is an optional payload followed by the two status bytes
//! SW1 and SW2.

pub mod status;

use bytes::{BufMut, Bytes, BytesMut};

use crate::Error;
use status::StatusWord;

/// Common accessors shared by response types
pub trait ApduResponse {
    /// Response payload, if any
    fn payload(&self) -> &Option<Bytes>;

    /// Status word
    fn status(&self) -> StatusWord;

    /// Whether the status word is `90 00`
    fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Payload as a slice, empty when absent
    fn data(&self) -> &[u8] {
        self.payload().as_deref().unwrap_or(&[])
    }
}

/// Generic APDU response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response data (optional)
    pub data: Option<Bytes>,
    /// Status word
    pub status: StatusWord,
}

impl Response {
    /// Create a response from a payload and a status word
    pub const fn new(data: Option<Bytes>, status: StatusWord) -> Self {
        Self { data, status }
    }

    /// Split raw response bytes into payload and status word
    ///
    /// Fails when fewer than two bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::InvalidResponseLength(bytes.len()));
        }

        let split = bytes.len() - 2;
        let status = StatusWord::new(bytes[split], bytes[split + 1]);
        let data = if split == 0 {
            None
        } else {
            Some(Bytes::copy_from_slice(&bytes[..split]))
        };

        Ok(Self { data, status })
    }

    /// Raw length of the response on the wire (payload plus status word)
    pub fn wire_len(&self) -> usize {
        self.data().len() + 2
    }

    /// Serialize back to raw bytes (payload followed by SW1 SW2)
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.wire_len());
        buffer.put_slice(self.data());
        buffer.put_u8(self.status.sw1);
        buffer.put_u8(self.status.sw2);
        buffer.freeze()
    }
}

impl ApduResponse for Response {
    fn payload(&self) -> &Option<Bytes> {
        &self.data
    }

    fn status(&self) -> StatusWord {
        self.status
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        response.to_bytes()
    }
}
