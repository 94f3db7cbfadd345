//! Credential algorithms for the software card
//!
//! An [`AuthAlgorithm`] is the pluggable 3GPP authentication function set:
//! f1 and f1* produce the network and resynchronisation MACs, f2 to f5
//! produce RES, CK, IK and AK, f5* the resynchronisation anonymity key.
//! Physical cards never go through this module.

mod milenage;
mod xor;

pub use milenage::{Milenage, compute_opc};
pub use xor::Xor;

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{AK_LEN, CK_LEN, IK_LEN, MAC_LEN, RAND_LEN, SQN_LEN};

/// Length of RES produced by the software algorithms
pub const SOFT_RES_LEN: usize = 8;

/// Output of f2, f3, f4 and f5 for one RAND
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthVector {
    /// Response (f2)
    pub res: [u8; SOFT_RES_LEN],
    /// Cipher key (f3)
    pub ck: [u8; CK_LEN],
    /// Integrity key (f4)
    pub ik: [u8; IK_LEN],
    /// Anonymity key (f5)
    pub ak: [u8; AK_LEN],
}

impl fmt::Debug for AuthVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthVector")
            .field("res", &hex::encode(self.res))
            .field("ak", &hex::encode(self.ak))
            .finish_non_exhaustive()
    }
}

/// 3GPP authentication function set keyed with a subscriber's credentials
pub trait AuthAlgorithm: Send + Sync + fmt::Debug {
    /// Network authentication code MAC-A
    fn f1(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> [u8; MAC_LEN];

    /// Resynchronisation authentication code MAC-S
    fn f1_star(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2])
    -> [u8; MAC_LEN];

    /// RES, CK, IK and AK
    fn f2345(&self, rand: &[u8; RAND_LEN]) -> AuthVector;

    /// Resynchronisation anonymity key
    fn f5_star(&self, rand: &[u8; RAND_LEN]) -> [u8; AK_LEN];
}

fn xor_in_place<const N: usize>(target: &mut [u8; N], other: &[u8; N]) {
    target.iter_mut().zip(other).for_each(|(a, b)| *a ^= b);
}

/// `SQN || AMF`, twice, as used by f1 and f1*
fn sqn_amf_block(sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[..6].copy_from_slice(sqn);
    block[6..8].copy_from_slice(amf);
    block[8..14].copy_from_slice(sqn);
    block[14..].copy_from_slice(amf);
    block
}
