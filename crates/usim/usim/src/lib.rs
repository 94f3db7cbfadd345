//! SIM/USIM protocol engine
//!
//! Builds the command APDUs a subscriber identity module understands,
//! interprets its status words, walks its file system and runs the AKA and
//! GSM authentication exchanges. A software card with Milenage and XOR
//! credential algorithms stands in for a physical one when needed.
//!
//! ```no_run
//! use simauth_usim::{AkaOutcome, Session, SoftUsimConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SoftUsimConfig::builder()
//!     .algorithm("milenage")
//!     .imsi("208930000000001")
//!     .imei("356092040793011")
//!     .k("8BAF473F2F8FD09487CCCBD7097C6862")
//!     .op("11111111111111111111111111111111")
//!     .build()?;
//! let mut session = Session::software(config);
//!
//! let challenge = simauth_usim::Challenge::from_hex(
//!     "8838c355c878aa572149fe69db686b5a",
//!     "d744519b25aa800084ba37b0f6734dd1",
//! )?;
//! match session.authenticate(&challenge.rand, &challenge.autn)? {
//!     AkaOutcome::Success(keys) => println!("RES {}", hex::encode(keys.res())),
//!     AkaOutcome::SyncFailure(auts) => println!("AUTS {auts}"),
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod card;
mod commands;
mod constants;
mod crypto;
mod efdir;
mod error;
mod fcp;
mod identity;
mod session;
mod soft;
mod status;
mod types;
mod validation;

pub use card::{Usim, parse_auth_response, parse_gsm_response};
pub use commands::*;
pub use constants::*;
pub use crypto::{AuthAlgorithm, AuthVector, Milenage, SOFT_RES_LEN, Xor, compute_opc};
pub use efdir::{EfDirEntry, EfDirReject};
pub use error::{Error, ErrorKind, Result};
pub use fcp::FcpTemplate;
pub use identity::{
    Identity, NUMERAL_DIGITS, Plmn, encode_mcc_mnc, format_numeral, parse_numeral, swap_nibbles,
};
pub use session::{Session, SimCard};
pub use soft::{Algorithm, DEFAULT_AMF, SoftUsim, SoftUsimConfig, SoftUsimConfigBuilder};
pub use status::{StatusClass, classify};
pub use types::{Aid, AkaKeys, AkaOutcome, Auts, CardMode, Challenge, FileRef, GsmAuthResult};
pub use validation::ValidationError;
