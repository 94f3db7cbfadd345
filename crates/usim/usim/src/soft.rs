//! Software USIM
//!
//! Answers AKA and GSM challenges from host-supplied credentials instead of
//! a physical card. The sequence number check follows 3GPP TS 33.102: an
//! AUTN whose SQN is not above the highest accepted one yields a
//! resynchronisation token.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::constants::{AUTN_LEN, AUTS_LEN, KC_LEN, KEY_LEN, MAC_LEN, RAND_LEN, SQN_LEN, SRES_LEN};
use crate::crypto::{AuthAlgorithm, Milenage, Xor};
use crate::error::{Error, Result};
use crate::identity::{Identity, NUMERAL_DIGITS, Plmn};
use crate::types::{AkaKeys, AkaOutcome, Auts, GsmAuthResult};
use crate::validation::{ValidationError, ValidationResult, parse_hex_array, validate_digits};

/// AMF used when none is configured
pub const DEFAULT_AMF: [u8; 2] = [0x80, 0x00];

/// Credential algorithm of a software card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Algorithm {
    /// Milenage (TS 35.206)
    #[default]
    #[display("milenage")]
    Milenage,
    /// XOR test algorithm (TS 34.108)
    #[display("xor")]
    Xor,
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "milenage" => Ok(Self::Milenage),
            "xor" => Ok(Self::Xor),
            _ => Err(ValidationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[derive(Clone)]
enum OperatorKey {
    Op(Zeroizing<[u8; KEY_LEN]>),
    Opc(Zeroizing<[u8; KEY_LEN]>),
}

/// Validated software card configuration
#[derive(Clone)]
pub struct SoftUsimConfig {
    algorithm: Algorithm,
    imsi: String,
    imei: Option<String>,
    plmn: Plmn,
    k: Zeroizing<[u8; KEY_LEN]>,
    operator: Option<OperatorKey>,
    amf: [u8; 2],
    sqn_check: bool,
}

impl SoftUsimConfig {
    /// Start building a configuration from host strings
    pub fn builder() -> SoftUsimConfigBuilder {
        SoftUsimConfigBuilder::default()
    }

    /// Credential algorithm
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// IMSI digits
    pub fn imsi(&self) -> &str {
        &self.imsi
    }

    /// IMEI digits, if configured
    pub fn imei(&self) -> Option<&str> {
        self.imei.as_deref()
    }

    /// Home network derived from the IMSI
    pub const fn plmn(&self) -> &Plmn {
        &self.plmn
    }

    /// AMF expected in AUTN
    pub const fn amf(&self) -> [u8; 2] {
        self.amf
    }

    /// Whether SQN freshness is enforced
    pub const fn sqn_check(&self) -> bool {
        self.sqn_check
    }

    fn auth_algorithm(&self) -> Box<dyn AuthAlgorithm> {
        match (self.algorithm, &self.operator) {
            (Algorithm::Milenage, Some(OperatorKey::Op(op))) => Box::new(Milenage::with_op(&self.k, op)),
            (Algorithm::Milenage, Some(OperatorKey::Opc(opc))) => {
                Box::new(Milenage::with_opc(&self.k, opc))
            }
            // `build` refuses Milenage without an operator key
            (Algorithm::Milenage, None) | (Algorithm::Xor, _) => Box::new(Xor::new(&self.k)),
        }
    }
}

impl fmt::Debug for SoftUsimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftUsimConfig")
            .field("algorithm", &self.algorithm)
            .field("imsi", &self.imsi)
            .field("imei", &self.imei)
            .field("amf", &hex::encode(self.amf))
            .field("sqn_check", &self.sqn_check)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SoftUsimConfig`]
#[derive(Default)]
pub struct SoftUsimConfigBuilder {
    algorithm: Option<String>,
    imsi: Option<String>,
    imei: Option<String>,
    k: Option<Zeroizing<String>>,
    op: Option<Zeroizing<String>>,
    opc: Option<Zeroizing<String>>,
    amf: Option<String>,
    sqn_check: Option<bool>,
}

impl fmt::Debug for SoftUsimConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftUsimConfigBuilder")
            .field("algorithm", &self.algorithm)
            .field("imsi", &self.imsi)
            .field("imei", &self.imei)
            .finish_non_exhaustive()
    }
}

impl SoftUsimConfigBuilder {
    /// Algorithm name, `milenage` (default) or `xor`
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// IMSI, 15 digits
    pub fn imsi(mut self, imsi: impl Into<String>) -> Self {
        self.imsi = Some(imsi.into());
        self
    }

    /// IMEI, 15 digits
    pub fn imei(mut self, imei: impl Into<String>) -> Self {
        self.imei = Some(imei.into());
        self
    }

    /// Subscriber key K, 32 hex characters
    pub fn k(mut self, k: impl Into<String>) -> Self {
        self.k = Some(Zeroizing::new(k.into()));
        self
    }

    /// Operator variant OP, 32 hex characters
    pub fn op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(Zeroizing::new(op.into()));
        self
    }

    /// Precomputed OPc, 32 hex characters; takes precedence over OP
    pub fn opc(mut self, opc: impl Into<String>) -> Self {
        self.opc = Some(Zeroizing::new(opc.into()));
        self
    }

    /// Authentication management field, 4 hex characters
    pub fn amf(mut self, amf: impl Into<String>) -> Self {
        self.amf = Some(amf.into());
        self
    }

    /// Enforce SQN freshness (on by default)
    pub const fn sqn_check(mut self, enabled: bool) -> Self {
        self.sqn_check = Some(enabled);
        self
    }

    /// Validate and build
    pub fn build(self) -> ValidationResult<SoftUsimConfig> {
        let algorithm = self
            .algorithm
            .as_deref()
            .map(str::parse::<Algorithm>)
            .transpose()?
            .unwrap_or_default();

        let imsi = self.imsi.ok_or(ValidationError::Missing("IMSI"))?;
        validate_digits("IMSI", &imsi, NUMERAL_DIGITS)?;
        let plmn = Plmn::from_imsi(&imsi)?;

        if let Some(imei) = &self.imei {
            validate_digits("IMEI", imei, NUMERAL_DIGITS)?;
        }

        let k = self.k.ok_or(ValidationError::Missing("K"))?;
        let k = Zeroizing::new(parse_hex_array("K", &k)?);

        let operator = match (&self.opc, &self.op) {
            (Some(opc), _) => Some(OperatorKey::Opc(Zeroizing::new(parse_hex_array("OPc", opc)?))),
            (None, Some(op)) => Some(OperatorKey::Op(Zeroizing::new(parse_hex_array("OP", op)?))),
            (None, None) if algorithm == Algorithm::Milenage => {
                return Err(ValidationError::Missing("OP or OPc"));
            }
            (None, None) => None,
        };

        let amf = match &self.amf {
            Some(amf) => parse_hex_array("AMF", amf)?,
            None => DEFAULT_AMF,
        };

        Ok(SoftUsimConfig {
            algorithm,
            imsi,
            imei: self.imei,
            plmn,
            k,
            operator,
            amf,
            sqn_check: self.sqn_check.unwrap_or(true),
        })
    }
}

/// Software stand-in for a USIM
pub struct SoftUsim {
    algorithm: Box<dyn AuthAlgorithm>,
    identity: Identity,
    amf: [u8; 2],
    sqn_check: bool,
    /// Highest SQN accepted so far
    sqn: u64,
}

impl SoftUsim {
    /// Create a software card from a validated configuration
    pub fn new(config: &SoftUsimConfig) -> Self {
        Self {
            algorithm: config.auth_algorithm(),
            identity: Identity {
                imsi: config.imsi.clone(),
                iccid: None,
                msisdn: None,
                imei: config.imei.clone(),
                plmn: config.plmn.clone(),
            },
            amf: config.amf,
            sqn_check: config.sqn_check,
            sqn: 0,
        }
    }

    /// Highest SQN accepted so far
    pub const fn sqn(&self) -> u64 {
        self.sqn
    }

    /// Identity from the configuration
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Build the AUTN a network would send for `rand` and `sqn`, using the
    /// configured AMF
    pub fn autn(&self, rand: &[u8; RAND_LEN], sqn: u64) -> [u8; AUTN_LEN] {
        let sqn = sqn_bytes(sqn);
        let ak = self.algorithm.f2345(rand).ak;
        let mac = self.algorithm.f1(rand, &sqn, &self.amf);

        let mut autn = [0u8; AUTN_LEN];
        for (i, byte) in autn[..SQN_LEN].iter_mut().enumerate() {
            *byte = sqn[i] ^ ak[i];
        }
        autn[SQN_LEN..SQN_LEN + 2].copy_from_slice(&self.amf);
        autn[SQN_LEN + 2..].copy_from_slice(&mac);
        autn
    }

    /// Verify AUTN and derive RES, CK and IK
    #[instrument(level = "debug", skip_all, err)]
    pub fn authenticate(
        &mut self,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<AkaOutcome> {
        let vector = self.algorithm.f2345(rand);

        let sqn: [u8; SQN_LEN] = std::array::from_fn(|i| autn[i] ^ vector.ak[i]);
        let amf = [autn[SQN_LEN], autn[SQN_LEN + 1]];
        let xmac = self.algorithm.f1(rand, &sqn, &amf);
        if xmac[..] != autn[SQN_LEN + 2..] {
            return Err(Error::MacMismatch);
        }

        if self.sqn_check {
            let received = sqn_value(&sqn);
            if received <= self.sqn {
                let auts = self.auts(rand);
                debug!(received, highest = self.sqn, "SQN not fresh, requesting resync");
                return Ok(AkaOutcome::SyncFailure(auts));
            }
            self.sqn = received;
        }

        Ok(AkaOutcome::Success(AkaKeys::new(
            &vector.res,
            vector.ck,
            vector.ik,
        )))
    }

    /// Derive SRES and Kc with the c2 and c3 conversions of TS 33.102
    pub fn gsm_authenticate(&self, rand: &[u8; RAND_LEN]) -> GsmAuthResult {
        let vector = self.algorithm.f2345(rand);

        let sres: [u8; SRES_LEN] = std::array::from_fn(|i| vector.res[i] ^ vector.res[i + SRES_LEN]);
        let kc: [u8; KC_LEN] = std::array::from_fn(|i| {
            vector.ck[i] ^ vector.ck[i + KC_LEN] ^ vector.ik[i] ^ vector.ik[i + KC_LEN]
        });
        GsmAuthResult::new(sres, kc)
    }

    /// `AUTS = (SQN_MS xor AK*) || MAC-S`, with MAC-S over a zero AMF
    fn auts(&self, rand: &[u8; RAND_LEN]) -> Auts {
        let sqn_ms = sqn_bytes(self.sqn);
        let ak_star = self.algorithm.f5_star(rand);
        let mac_s = self.algorithm.f1_star(rand, &sqn_ms, &[0, 0]);

        let mut auts = [0u8; AUTS_LEN];
        for (i, byte) in auts[..SQN_LEN].iter_mut().enumerate() {
            *byte = sqn_ms[i] ^ ak_star[i];
        }
        auts[SQN_LEN..SQN_LEN + MAC_LEN].copy_from_slice(&mac_s);
        Auts::new(auts)
    }
}

impl fmt::Debug for SoftUsim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftUsim")
            .field("algorithm", &self.algorithm)
            .field("imsi", &self.identity.imsi)
            .field("sqn", &self.sqn)
            .finish_non_exhaustive()
    }
}

fn sqn_value(sqn: &[u8; SQN_LEN]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[2..].copy_from_slice(sqn);
    u64::from_be_bytes(bytes)
}

fn sqn_bytes(sqn: u64) -> [u8; SQN_LEN] {
    let mut out = [0u8; SQN_LEN];
    out.copy_from_slice(&sqn.to_be_bytes()[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Challenge;
    use hex_literal::hex;

    const K: &str = "8BAF473F2F8FD09487CCCBD7097C6862";
    const OP: &str = "11111111111111111111111111111111";
    const OPC: &str = "8e27b6af0e692e750f32667a3b14605d";

    fn challenge() -> Challenge {
        Challenge::from_hex(
            "8838c355c878aa572149fe69db686b5a",
            "d744519b25aa800084ba37b0f6734dd1",
        )
        .unwrap()
    }

    fn milenage_config() -> SoftUsimConfigBuilder {
        SoftUsimConfig::builder()
            .algorithm("milenage")
            .imsi("208930000000001")
            .imei("356092040793011")
            .k(K)
            .op(OP)
    }

    #[test]
    fn test_milenage_vector() {
        let mut usim = SoftUsim::new(&milenage_config().build().unwrap());
        let challenge = challenge();

        let outcome = usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
        let keys = outcome.keys().unwrap();
        assert_eq!(keys.res(), hex!("e55d8827918dacc6"));
        assert_eq!(keys.ck(), &hex!("05d3533dfe7be72d42c7bb02f28eda7f"));
        assert_eq!(keys.ik(), &hex!("2633a20bdca89d7858ba42478be4d24d"));
        assert_eq!(usim.sqn(), 0x1b57);
    }

    #[test]
    fn test_opc_matches_op() {
        let mut usim = SoftUsim::new(&milenage_config().opc(OPC).build().unwrap());
        let challenge = challenge();
        let outcome = usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
        assert_eq!(outcome.keys().unwrap().res(), hex!("e55d8827918dacc6"));
    }

    #[test]
    fn test_replay_yields_sync_failure() {
        let config = milenage_config().build().unwrap();
        let mut usim = SoftUsim::new(&config);
        let challenge = challenge();

        usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
        let outcome = usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
        let auts = *outcome.auts().unwrap();

        // AUTS conceals SQN_MS under AK* and carries MAC-S over it
        let milenage = Milenage::with_op(
            &parse_hex_array("K", K).unwrap(),
            &parse_hex_array("OP", OP).unwrap(),
        );
        let ak_star = milenage.f5_star(&challenge.rand);
        let sqn_ms: [u8; SQN_LEN] = std::array::from_fn(|i| auts.as_bytes()[i] ^ ak_star[i]);
        assert_eq!(sqn_ms, hex!("000000001b57"));
        assert_eq!(
            auts.as_bytes()[SQN_LEN..],
            milenage.f1_star(&challenge.rand, &sqn_ms, &[0, 0])
        );
    }

    #[test]
    fn test_generated_autn_round_trips() {
        let mut usim = SoftUsim::new(&milenage_config().build().unwrap());
        let challenge = challenge();
        assert_eq!(usim.autn(&challenge.rand, 0x1b57), challenge.autn);

        let fresh = usim.autn(&challenge.rand, 0x1b58);
        usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
        let outcome = usim.authenticate(&challenge.rand, &fresh).unwrap();
        assert!(outcome.keys().is_some());
        assert_eq!(usim.sqn(), 0x1b58);
    }

    #[test]
    fn test_sqn_check_disabled() {
        let config = milenage_config().sqn_check(false).build().unwrap();
        let mut usim = SoftUsim::new(&config);
        let challenge = challenge();

        for _ in 0..2 {
            let outcome = usim.authenticate(&challenge.rand, &challenge.autn).unwrap();
            assert!(outcome.keys().is_some());
        }
        assert_eq!(usim.sqn(), 0);
    }

    #[test]
    fn test_mac_mismatch() {
        let mut usim = SoftUsim::new(&milenage_config().build().unwrap());
        let mut challenge = challenge();
        challenge.autn[15] ^= 0x01;

        assert!(matches!(
            usim.authenticate(&challenge.rand, &challenge.autn),
            Err(Error::MacMismatch)
        ));
        assert_eq!(usim.sqn(), 0);
    }

    #[test]
    fn test_gsm_conversion() {
        let usim = SoftUsim::new(&milenage_config().build().unwrap());
        let result = usim.gsm_authenticate(&challenge().rand);

        // e55d8827 xor 918dacc6
        assert_eq!(result.sres(), &hex!("74d024e1"));
        let ck = hex!("05d3533dfe7be72d42c7bb02f28eda7f");
        let ik = hex!("2633a20bdca89d7858ba42478be4d24d");
        let kc: [u8; 8] = std::array::from_fn(|i| ck[i] ^ ck[i + 8] ^ ik[i] ^ ik[i + 8]);
        assert_eq!(result.kc(), &kc);
    }

    #[test]
    fn test_xor_card() {
        let config = SoftUsimConfig::builder()
            .algorithm("XOR")
            .imsi("001010000000001")
            .k("000102030405060708090a0b0c0d0e0f")
            .build()
            .unwrap();
        assert_eq!(config.algorithm(), Algorithm::Xor);

        let rand = [0u8; 16];
        let mut usim = SoftUsim::new(&config);
        let autn = usim.autn(&rand, 0x20);
        // SQN xor AK, AMF, then xdout[0..8] xor (SQN || AMF)
        assert_eq!(autn, hex!("03040506072880000001020304258607"));

        let outcome = usim.authenticate(&rand, &autn).unwrap();
        assert_eq!(outcome.keys().unwrap().res(), hex!("0001020304050607"));
        assert_eq!(usim.sqn(), 0x20);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            SoftUsimConfig::builder().k(K).op(OP).build().unwrap_err(),
            ValidationError::Missing("IMSI")
        );
        assert_eq!(
            milenage_config().algorithm("comp128").build().unwrap_err(),
            ValidationError::UnknownAlgorithm("comp128".to_string())
        );
        assert!(matches!(
            milenage_config().imei("35609204079301").build(),
            Err(ValidationError::IncorrectLength { field: "IMEI", .. })
        ));
        assert!(matches!(
            milenage_config().k("8BAF").build(),
            Err(ValidationError::IncorrectLength { field: "K", .. })
        ));
        assert_eq!(
            SoftUsimConfig::builder()
                .imsi("208930000000001")
                .k(K)
                .build()
                .unwrap_err(),
            ValidationError::Missing("OP or OPc")
        );

        let config = milenage_config().amf("B9B9").build().unwrap();
        assert_eq!(config.amf(), hex!("B9B9"));
        assert_eq!(config.plmn().mnc, "93");
        assert!(config.sqn_check());
    }

    #[test]
    fn test_identity() {
        let usim = SoftUsim::new(&milenage_config().build().unwrap());
        let identity = usim.identity();
        assert_eq!(identity.imsi, "208930000000001");
        assert_eq!(identity.imei.as_deref(), Some("356092040793011"));
        assert!(identity.iccid.is_none());
        assert!(identity.msisdn.is_none());
        assert_eq!(identity.plmn.encode().unwrap(), (0xF208, 0xFF93));
    }
}
