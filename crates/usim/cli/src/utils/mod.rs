//! Argument helpers and output formatting for the USIM CLI

pub mod display;
pub mod reader;

use clap::Args;
use simauth_usim::{Challenge, SoftUsimConfig, ValidationError};

/// RAND and AUTN, either as hex or as one base64 blob
#[derive(Args, Debug, Clone)]
pub struct ChallengeArgs {
    /// RAND, 32 hex characters
    #[arg(long, requires = "autn", group = "challenge")]
    pub rand: Option<String>,

    /// AUTN, 32 hex characters
    #[arg(long, requires = "rand")]
    pub autn: Option<String>,

    /// Base64 of RAND || AUTN
    #[arg(long, group = "challenge")]
    pub base64: Option<String>,
}

impl ChallengeArgs {
    /// Parse the challenge
    pub fn parse(&self) -> Result<Challenge, ValidationError> {
        match (&self.rand, &self.autn, &self.base64) {
            (Some(rand), Some(autn), _) => Challenge::from_hex(rand, autn),
            (_, _, Some(blob)) => Challenge::from_base64(blob),
            _ => Err(ValidationError::Missing("RAND and AUTN")),
        }
    }
}

/// Software card credentials as given on the command line
#[derive(Debug)]
pub struct SoftArgs<'a> {
    pub algorithm: &'a str,
    pub k: &'a str,
    pub op: Option<&'a str>,
    pub opc: Option<&'a str>,
    pub imsi: &'a str,
    pub imei: Option<&'a str>,
}

impl SoftArgs<'_> {
    /// Validate into a software card configuration
    pub fn build(&self) -> Result<SoftUsimConfig, ValidationError> {
        let mut builder = SoftUsimConfig::builder()
            .algorithm(self.algorithm)
            .k(self.k)
            .imsi(self.imsi);
        if let Some(op) = self.op {
            builder = builder.op(op);
        }
        if let Some(opc) = self.opc {
            builder = builder.opc(opc);
        }
        if let Some(imei) = self.imei {
            builder = builder.imei(imei);
        }
        builder.build()
    }
}
