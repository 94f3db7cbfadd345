//! SIM/USIM card driver
//!
//! [`Usim`] owns an [`Executor`] and the per-session state a card needs: the
//! class byte it answers to, the discovered USIM AID and the identity read
//! from it. Every logical operation is a fixed sequence of SELECT, GET
//! RESPONSE and read or authenticate commands; nothing is retried.

mod aka;
mod discovery;
mod gsm;
mod subscriber;

pub use aka::parse_auth_response;
pub use gsm::parse_gsm_response;

use bytes::Bytes;
use simauth_apdu_core::{CardExecutor, CardTransport, Executor};
use tracing::{debug, instrument};

use crate::commands::{
    GetResponseCommand, ReadBinaryCommand, ReadRecordCommand, RecordLengthCommand, SelectCommand,
};
use crate::error::{Error, Result};
use crate::fcp::FcpTemplate;
use crate::identity::Identity;
use crate::types::{Aid, CardMode, FileRef};

/// A physical SIM or USIM behind an executor
#[derive(Debug)]
pub struct Usim<E: Executor> {
    executor: E,
    mode: CardMode,
    aid: Option<Aid>,
    identity: Option<Identity>,
}

impl<T: CardTransport> Usim<CardExecutor<T>> {
    /// Drive a card over `transport`
    pub fn new(transport: T) -> Self {
        Self::with_executor(CardExecutor::new(transport))
    }
}

impl<E: Executor> Usim<E> {
    /// Drive a card through an existing executor
    pub const fn with_executor(executor: E) -> Self {
        Self {
            executor,
            mode: CardMode::Usim,
            aid: None,
            identity: None,
        }
    }

    /// Current card mode
    pub const fn mode(&self) -> CardMode {
        self.mode
    }

    /// Force the card mode for the rest of the session
    pub fn set_mode(&mut self, mode: CardMode) {
        self.mode = mode;
    }

    /// The USIM AID, if discovered already
    pub const fn aid(&self) -> Option<&Aid> {
        self.aid.as_ref()
    }

    /// Underlying executor
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Underlying executor, mutably
    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Select a file or application and return its raw FCP
    ///
    /// Issues SELECT and then exactly one GET RESPONSE sized from SELECT's
    /// status word. A refused SELECT is returned without GET RESPONSE. The
    /// returned buffer still carries its status word.
    #[instrument(level = "debug", skip(self), err)]
    pub fn select(&mut self, mode: CardMode, target: &FileRef) -> Result<Bytes> {
        let available = self.executor.execute(&SelectCommand::new(mode, target))?;
        self.executor
            .execute(&GetResponseCommand::new(mode, available))
    }

    /// READ BINARY of `length` bytes from the current EF
    pub fn read_binary(&mut self, mode: CardMode, length: usize) -> Result<Bytes> {
        let length = u8::try_from(length).map_err(|_| Error::FileTooLarge(length))?;
        self.executor
            .execute(&ReadBinaryCommand::new(mode, length))
    }

    /// Length of `record` in the current linear fixed EF
    pub fn read_record_length(&mut self, mode: CardMode, record: u8) -> Result<u8> {
        self.executor
            .execute(&RecordLengthCommand::new(mode, record))
    }

    /// READ RECORD of `length` bytes
    pub fn read_record(&mut self, mode: CardMode, record: u8, length: u8) -> Result<Bytes> {
        self.executor
            .execute(&ReadRecordCommand::new(mode, record, length))
    }

    /// Read a transparent EF whose FCP was just returned by [`Usim::select`]
    fn read_transparent(&mut self, mode: CardMode, fcp: &[u8]) -> Result<Bytes> {
        let size = FcpTemplate::new(fcp)?.file_size()?;
        self.read_binary(mode, size)
    }

    /// Drop cached state, return to USIM mode and reset the executor
    pub fn reset(&mut self) -> Result<()> {
        debug!("Resetting card session");
        self.aid = None;
        self.identity = None;
        self.mode = CardMode::Usim;
        self.executor.reset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::file;
    use hex_literal::hex;
    use simauth_apdu_core::transport::MockTransport;

    #[test]
    fn test_select_issues_one_get_response() {
        let mock = MockTransport::with_responses([hex!("6119").to_vec(), hex!("6F00").to_vec()]);
        let mut usim = Usim::new(mock.clone());

        let err = usim
            .select(CardMode::Usim, &FileRef::Id(file::EF_IMSI))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ProtocolViolation {
                command: "GET RESPONSE",
                ..
            }
        ));

        let commands = mock.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].as_ref(), hex!("00A40000026F07"));
        assert_eq!(commands[1].as_ref(), hex!("00C0000019"));
    }

    #[test]
    fn test_select_returns_fcp_with_status() {
        let mock = MockTransport::with_responses([
            hex!("9F0F").to_vec(),
            hex!("620D82024121830200098002000A9000").to_vec(),
        ]);
        let mut usim = Usim::new(mock.clone());

        let fcp = usim.select(CardMode::Gsm, &FileRef::Id(0x0009)).unwrap();
        assert_eq!(FcpTemplate::new(&fcp).unwrap().file_size().unwrap(), 10);
        assert_eq!(mock.commands()[1].as_ref(), hex!("A0C000000F"));
    }

    #[test]
    fn test_refused_select_skips_get_response() {
        let mock = MockTransport::with_responses([hex!("9804").to_vec()]);
        let mut usim = Usim::new(mock.clone());

        let err = usim
            .select(CardMode::Usim, &FileRef::Id(file::MF))
            .unwrap_err();
        assert!(matches!(err, Error::SecurityDenied(_)));
        assert_eq!(mock.commands().len(), 1);
    }

    #[test]
    fn test_read_binary_rejects_large_files() {
        let mut usim = Usim::new(MockTransport::new());
        assert!(matches!(
            usim.read_binary(CardMode::Usim, 256),
            Err(Error::FileTooLarge(256))
        ));
    }

    #[test]
    fn test_reset_clears_mode() {
        let mut usim = Usim::new(MockTransport::new());
        usim.set_mode(CardMode::Gsm);
        usim.reset().unwrap();
        assert_eq!(usim.mode(), CardMode::Usim);
        assert!(usim.aid().is_none());
    }
}
