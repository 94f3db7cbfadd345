//! Backend-independent session
//!
//! A [`Session`] drives either a physical card or a software card through
//! the same three operations. The backend is picked at construction and
//! owns all per-session state, including the card mode fallback.

use std::fmt;

use simauth_apdu_core::{CardTransport, Executor};

use crate::card::Usim;
use crate::constants::{AUTN_LEN, RAND_LEN};
use crate::error::Result;
use crate::identity::Identity;
use crate::soft::{SoftUsim, SoftUsimConfig};
use crate::types::{AkaOutcome, GsmAuthResult};

/// Operations every SIM backend offers
pub trait SimCard: Send + fmt::Debug {
    /// Run AKA; a synchronisation failure is an `Ok` outcome
    fn authenticate(&mut self, rand: &[u8; RAND_LEN], autn: &[u8; AUTN_LEN])
    -> Result<AkaOutcome>;

    /// Run the GSM algorithm
    fn gsm_authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<GsmAuthResult>;

    /// Subscriber identity
    fn identity(&mut self) -> Result<Identity>;

    /// Drop session state
    fn close(&mut self) -> Result<()>;
}

impl<E: Executor> SimCard for Usim<E> {
    fn authenticate(
        &mut self,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<AkaOutcome> {
        Self::authenticate(self, rand, autn)
    }

    fn gsm_authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<GsmAuthResult> {
        Self::gsm_authenticate(self, rand)
    }

    fn identity(&mut self) -> Result<Identity> {
        Self::identity(self)
    }

    fn close(&mut self) -> Result<()> {
        self.reset()
    }
}

impl SimCard for SoftUsim {
    fn authenticate(
        &mut self,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<AkaOutcome> {
        Self::authenticate(self, rand, autn)
    }

    fn gsm_authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<GsmAuthResult> {
        Ok(Self::gsm_authenticate(self, rand))
    }

    fn identity(&mut self) -> Result<Identity> {
        Ok(Self::identity(self).clone())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A SIM session over a physical or software card
#[derive(Debug)]
pub struct Session {
    backend: Box<dyn SimCard>,
}

impl Session {
    /// Session over any backend
    pub fn new(backend: impl SimCard + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Session over a physical card reached through `transport`
    pub fn card<T: CardTransport + 'static>(transport: T) -> Self {
        Self::new(Usim::new(transport))
    }

    /// Session over a software card
    pub fn software(config: SoftUsimConfig) -> Self {
        Self::new(SoftUsim::new(&config))
    }

    /// Run AKA for `rand` and `autn`
    pub fn authenticate(
        &mut self,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<AkaOutcome> {
        self.backend.authenticate(rand, autn)
    }

    /// Run the GSM algorithm for `rand`
    pub fn gsm_authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<GsmAuthResult> {
        self.backend.gsm_authenticate(rand)
    }

    /// Subscriber identity
    pub fn identity(&mut self) -> Result<Identity> {
        self.backend.identity()
    }

    /// Clear cached state and reset the backend
    pub fn close(&mut self) -> Result<()> {
        self.backend.close()
    }
}
