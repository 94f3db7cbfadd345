//! XOR test algorithm (3GPP TS 34.108, 8.1.2)
//!
//! Only for test networks; it offers no security.

use std::fmt;

use zeroize::Zeroizing;

use super::{AuthAlgorithm, AuthVector, SOFT_RES_LEN};
use crate::constants::{AK_LEN, KEY_LEN, MAC_LEN, RAND_LEN, SQN_LEN};

/// XOR algorithm keyed with K
pub struct Xor {
    k: Zeroizing<[u8; KEY_LEN]>,
}

impl Xor {
    /// Key with K
    pub fn new(k: &[u8; KEY_LEN]) -> Self {
        Self {
            k: Zeroizing::new(*k),
        }
    }

    fn xdout(&self, rand: &[u8; RAND_LEN]) -> Zeroizing<[u8; 16]> {
        let mut xdout = Zeroizing::new(*rand);
        xdout.iter_mut().zip(self.k.iter()).for_each(|(x, k)| *x ^= k);
        xdout
    }

    fn mac(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> [u8; MAC_LEN] {
        let xdout = self.xdout(rand);
        let mut mac = [0u8; MAC_LEN];
        mac[..SQN_LEN].copy_from_slice(sqn);
        mac[SQN_LEN..].copy_from_slice(amf);
        mac.iter_mut().zip(xdout.iter()).for_each(|(m, x)| *m ^= x);
        mac
    }
}

impl fmt::Debug for Xor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xor").finish_non_exhaustive()
    }
}

impl AuthAlgorithm for Xor {
    fn f1(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> [u8; MAC_LEN] {
        self.mac(rand, sqn, amf)
    }

    fn f1_star(
        &self,
        rand: &[u8; RAND_LEN],
        sqn: &[u8; SQN_LEN],
        amf: &[u8; 2],
    ) -> [u8; MAC_LEN] {
        self.mac(rand, sqn, amf)
    }

    fn f2345(&self, rand: &[u8; RAND_LEN]) -> AuthVector {
        let xdout = self.xdout(rand);

        let mut res = [0u8; SOFT_RES_LEN];
        res.copy_from_slice(&xdout[..SOFT_RES_LEN]);
        let ck = std::array::from_fn(|i| xdout[(i + 1) % 16]);
        let ik = std::array::from_fn(|i| xdout[(i + 2) % 16]);
        let mut ak = [0u8; AK_LEN];
        ak.copy_from_slice(&xdout[3..3 + AK_LEN]);

        AuthVector { res, ck, ik, ak }
    }

    fn f5_star(&self, rand: &[u8; RAND_LEN]) -> [u8; AK_LEN] {
        self.f2345(rand).ak
    }
}
