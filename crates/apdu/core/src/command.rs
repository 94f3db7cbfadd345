//! APDU command trait
//!
//! Types implementing [`ApduCommand`] describe one command APDU according to
//! ISO/IEC 7816-4 (short form only: Lc and Le are single bytes).

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Response};

/// Longest command body a short APDU can carry
pub const MAX_SHORT_DATA_LEN: usize = 255;

/// Core trait for APDU commands
///
/// Implementors describe the header, the optional body and how the card's
/// answer is interpreted. Interpretation takes `&self` so a command can check
/// the response against its own parameters (for example a declared read
/// length).
pub trait ApduCommand {
    /// Success response type
    type Success;

    /// Error response type
    type Error: fmt::Debug;

    /// Convert core Error to command-specific error type
    fn convert_error(error: Error) -> Self::Error;

    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<u8>;

    /// Convert to raw APDU bytes
    ///
    /// Fails with [`Error::InvalidCommandLength`] when the body does not fit
    /// a single Lc byte.
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        if let Some(data) = self.data() {
            let lc = u8::try_from(data.len())
                .map_err(|_| Error::InvalidCommandLength(data.len()))?;
            buffer.put_u8(lc);
            buffer.put_slice(data);
        }

        if let Some(le) = self.expected_length() {
            buffer.put_u8(le);
        }

        Ok(buffer.freeze())
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;

        if let Some(data) = self.data() {
            length += 1 + data.len();
        }

        if self.expected_length().is_some() {
            length += 1;
        }

        length
    }

    /// Interpret the card's response for this command
    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error>;
}
