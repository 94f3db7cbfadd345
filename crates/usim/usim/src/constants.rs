//! File identifiers, tags and command codes (ETSI TS 102 221, TS 31.102,
//! GSM 11.11)

/// Class bytes
pub mod cla {
    /// GSM 11.11 class
    pub const GSM: u8 = 0xA0;
    /// UICC/USIM class
    pub const USIM: u8 = 0x00;
}

/// Instruction bytes
pub mod ins {
    /// SELECT
    pub const SELECT: u8 = 0xA4;
    /// GET RESPONSE
    pub const GET_RESPONSE: u8 = 0xC0;
    /// READ BINARY
    pub const READ_BINARY: u8 = 0xB0;
    /// READ RECORD
    pub const READ_RECORD: u8 = 0xB2;
    /// RUN GSM ALGORITHM / AUTHENTICATE
    pub const AUTHENTICATE: u8 = 0x88;
}

/// File identifiers
pub mod file {
    /// Master File
    pub const MF: u16 = 0x3F00;
    /// DF_TELECOM
    pub const DF_TELECOM: u16 = 0x7F10;
    /// DF_GSM
    pub const DF_GSM: u16 = 0x7F20;
    /// EF_IMSI
    pub const EF_IMSI: u16 = 0x6F07;
    /// EF_MSISDN
    pub const EF_MSISDN: u16 = 0x6F40;
    /// EF_DIR (application directory)
    pub const EF_DIR: u16 = 0x2F00;
    /// EF_ICCID
    pub const EF_ICCID: u16 = 0x2FE2;
}

/// FCP template tags
pub mod tags {
    /// FCP template
    pub const FCP_TEMPLATE: u8 = 0x62;
    /// File size
    pub const FILE_SIZE: u8 = 0x80;

    /// EF_DIR application template
    pub const APPLICATION_TEMPLATE: u8 = 0x61;
    /// EF_DIR application identifier
    pub const APPLICATION_ID: u8 = 0x4F;

    /// Successful 3G authentication
    pub const AUTH_SUCCESS: u8 = 0xDB;
    /// Synchronisation failure
    pub const AUTH_SYNC_FAILURE: u8 = 0xDC;
}

/// READ RECORD absolute addressing mode (P2)
pub const RECORD_MODE_ABSOLUTE: u8 = 0x04;

/// P2 of RUN UMTS ALG: 3G security context
pub const AUTH_CONTEXT_3G: u8 = 0x81;

/// Application code of a 3G USIM in EF_DIR
pub const USIM_APPLICATION_CODE: [u8; 2] = [0x10, 0x02];

/// Highest EF_DIR record read during application discovery
pub const EF_DIR_MAX_RECORDS: u8 = 9;

/// Well-known USIM AID used as the alternate MSISDN path
pub const MSISDN_FALLBACK_AID: [u8; 16] = [
    0xA0, 0x00, 0x00, 0x00, 0x87, 0x10, 0x02, 0xFF, 0x44, 0xFF, 0x12, 0x89, 0x00, 0x00, 0x01, 0x00,
];

/// Length of the alpha identifier in front of an EF_MSISDN record
pub const MSISDN_ALPHA_LEN: usize = 16;

/// RAND length
pub const RAND_LEN: usize = 16;
/// AUTN length
pub const AUTN_LEN: usize = 16;
/// AUTS length
pub const AUTS_LEN: usize = 14;
/// Maximum RES length
pub const RES_MAX_LEN: usize = 16;
/// CK length
pub const CK_LEN: usize = 16;
/// IK length
pub const IK_LEN: usize = 16;
/// AK length
pub const AK_LEN: usize = 6;
/// SQN length
pub const SQN_LEN: usize = 6;
/// MAC length
pub const MAC_LEN: usize = 8;
/// K, OP and OPc length
pub const KEY_LEN: usize = 16;
/// SRES length
pub const SRES_LEN: usize = 4;
/// Kc length
pub const KC_LEN: usize = 8;

/// Shortest raw AUTHENTICATE response, status word included, parsed as a
/// success
pub const AUTH_SUCCESS_MIN_LEN: usize = 6 + CK_LEN + IK_LEN;
