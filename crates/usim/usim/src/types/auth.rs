//! Authentication results and the key material they carry

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{AUTS_LEN, CK_LEN, IK_LEN, KC_LEN, RES_MAX_LEN, SRES_LEN};

/// Keys produced by a successful AKA run
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AkaKeys {
    res: Vec<u8>,
    ck: [u8; CK_LEN],
    ik: [u8; IK_LEN],
}

impl AkaKeys {
    /// Assemble keys; RES is at most 16 bytes
    pub(crate) fn new(res: &[u8], ck: [u8; CK_LEN], ik: [u8; IK_LEN]) -> Self {
        debug_assert!(res.len() <= RES_MAX_LEN);
        Self {
            res: res.to_vec(),
            ck,
            ik,
        }
    }

    /// Authentication response (RES)
    pub fn res(&self) -> &[u8] {
        &self.res
    }

    /// Cipher key (CK)
    pub const fn ck(&self) -> &[u8; CK_LEN] {
        &self.ck
    }

    /// Integrity key (IK)
    pub const fn ik(&self) -> &[u8; IK_LEN] {
        &self.ik
    }
}

impl fmt::Debug for AkaKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AkaKeys")
            .field("res", &hex::encode(&self.res))
            .field("ck", &"<redacted>")
            .field("ik", &"<redacted>")
            .finish()
    }
}

/// Resynchronisation token returned on a sequence number mismatch
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Auts([u8; AUTS_LEN]);

impl Auts {
    /// Wrap AUTS bytes
    pub const fn new(bytes: [u8; AUTS_LEN]) -> Self {
        Self(bytes)
    }

    /// AUTS bytes
    pub const fn as_bytes(&self) -> &[u8; AUTS_LEN] {
        &self.0
    }
}

impl fmt::Debug for Auts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Auts({})", hex::encode(self.0))
    }
}

impl fmt::Display for Auts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Outcome of an AKA exchange that reached the card's verdict
///
/// A synchronisation failure is an expected result that asks the issuer to
/// resynchronise, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AkaOutcome {
    /// AUTN accepted
    Success(AkaKeys),
    /// Sequence number out of range
    SyncFailure(Auts),
}

impl AkaOutcome {
    /// Keys on success
    pub const fn keys(&self) -> Option<&AkaKeys> {
        match self {
            Self::Success(keys) => Some(keys),
            Self::SyncFailure(_) => None,
        }
    }

    /// AUTS on synchronisation failure
    pub const fn auts(&self) -> Option<&Auts> {
        match self {
            Self::Success(_) => None,
            Self::SyncFailure(auts) => Some(auts),
        }
    }
}

/// Result of a GSM challenge-response run
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct GsmAuthResult {
    sres: [u8; SRES_LEN],
    kc: [u8; KC_LEN],
}

impl GsmAuthResult {
    pub(crate) const fn new(sres: [u8; SRES_LEN], kc: [u8; KC_LEN]) -> Self {
        Self { sres, kc }
    }

    /// Signed response (SRES)
    pub const fn sres(&self) -> &[u8; SRES_LEN] {
        &self.sres
    }

    /// Ciphering key (Kc)
    pub const fn kc(&self) -> &[u8; KC_LEN] {
        &self.kc
    }
}

impl fmt::Debug for GsmAuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GsmAuthResult")
            .field("sres", &hex::encode(self.sres))
            .field("kc", &"<redacted>")
            .finish()
    }
}
