//! Milenage (3GPP TS 35.206)

use std::fmt;

use aes::Aes128;
use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use zeroize::Zeroizing;

use super::{AuthAlgorithm, AuthVector, sqn_amf_block, xor_in_place};
use crate::constants::{AK_LEN, KEY_LEN, MAC_LEN, RAND_LEN, SQN_LEN};

type Block = [u8; 16];

/// Milenage keyed with K and OPc
pub struct Milenage {
    cipher: Aes128,
    opc: Zeroizing<Block>,
}

impl Milenage {
    /// Key with K and the operator variant OP; OPc is derived
    pub fn with_op(k: &[u8; KEY_LEN], op: &[u8; KEY_LEN]) -> Self {
        let cipher = Aes128::new(GenericArray::from_slice(k));
        let opc = derive_opc(&cipher, op);
        Self {
            cipher,
            opc: Zeroizing::new(opc),
        }
    }

    /// Key with K and a precomputed OPc
    pub fn with_opc(k: &[u8; KEY_LEN], opc: &[u8; KEY_LEN]) -> Self {
        Self {
            cipher: Aes128::new(GenericArray::from_slice(k)),
            opc: Zeroizing::new(*opc),
        }
    }

    /// The OPc in use
    pub fn opc(&self) -> &[u8; KEY_LEN] {
        &self.opc
    }

    fn encrypt(&self, input: &Block) -> Block {
        let mut block = GenericArray::clone_from_slice(input);
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    /// `E_K(RAND xor OPc)`
    fn temp(&self, rand: &[u8; RAND_LEN]) -> Block {
        let mut input = *rand;
        xor_in_place(&mut input, &self.opc);
        self.encrypt(&input)
    }

    /// `E_K(rot(input xor OPc, r) xor c) xor OPc`, with `c` a single bit in
    /// the last byte
    fn out(&self, input: &Block, rotate_bytes: usize, constant: u8) -> Block {
        let mut masked = *input;
        xor_in_place(&mut masked, &self.opc);
        masked.rotate_left(rotate_bytes);
        masked[15] ^= constant;

        let mut out = self.encrypt(&masked);
        xor_in_place(&mut out, &self.opc);
        out
    }

    /// OUT1, whose halves are MAC-A and MAC-S
    fn out1(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> Block {
        let temp = self.temp(rand);
        let mut input = sqn_amf_block(sqn, amf);
        xor_in_place(&mut input, &self.opc);
        input.rotate_left(8);
        xor_in_place(&mut input, &temp);

        let mut out = self.encrypt(&input);
        xor_in_place(&mut out, &self.opc);
        out
    }
}

impl fmt::Debug for Milenage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Milenage").finish_non_exhaustive()
    }
}

impl AuthAlgorithm for Milenage {
    fn f1(&self, rand: &[u8; RAND_LEN], sqn: &[u8; SQN_LEN], amf: &[u8; 2]) -> [u8; MAC_LEN] {
        let out = self.out1(rand, sqn, amf);
        let mut mac = [0u8; MAC_LEN];
        mac.copy_from_slice(&out[..MAC_LEN]);
        mac
    }

    fn f1_star(
        &self,
        rand: &[u8; RAND_LEN],
        sqn: &[u8; SQN_LEN],
        amf: &[u8; 2],
    ) -> [u8; MAC_LEN] {
        let out = self.out1(rand, sqn, amf);
        let mut mac = [0u8; MAC_LEN];
        mac.copy_from_slice(&out[MAC_LEN..]);
        mac
    }

    fn f2345(&self, rand: &[u8; RAND_LEN]) -> AuthVector {
        let temp = Zeroizing::new(self.temp(rand));

        // r2 = 0, r3 = 32, r4 = 64 bits
        let out2 = self.out(&temp, 0, 1);
        let ck = self.out(&temp, 4, 2);
        let ik = self.out(&temp, 8, 4);

        let mut res = [0u8; 8];
        let mut ak = [0u8; AK_LEN];
        res.copy_from_slice(&out2[8..]);
        ak.copy_from_slice(&out2[..AK_LEN]);

        AuthVector { res, ck, ik, ak }
    }

    fn f5_star(&self, rand: &[u8; RAND_LEN]) -> [u8; AK_LEN] {
        // r5 = 96 bits
        let out5 = self.out(&self.temp(rand), 12, 8);
        let mut ak = [0u8; AK_LEN];
        ak.copy_from_slice(&out5[..AK_LEN]);
        ak
    }
}

fn derive_opc(cipher: &Aes128, op: &[u8; KEY_LEN]) -> Block {
    let mut block = GenericArray::clone_from_slice(op);
    cipher.encrypt_block(&mut block);
    let mut opc = [0u8; KEY_LEN];
    opc.copy_from_slice(&block);
    xor_in_place(&mut opc, op);
    opc
}

/// `OPc = OP xor E_K(OP)`
pub fn compute_opc(k: &[u8; KEY_LEN], op: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
    derive_opc(&Aes128::new(GenericArray::from_slice(k)), op)
}
