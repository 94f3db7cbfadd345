//! Subcommand implementations

use std::error::Error;

use simauth_apdu_core::CardTransport;
use simauth_usim::{AkaOutcome, Challenge, Identity, Session, SoftUsimConfig};

use crate::utils::ChallengeArgs;
use crate::utils::display::{key_value_box, success, warning};

/// Print the identity read from the card
pub fn identity_command<T: CardTransport + 'static>(transport: T) -> Result<(), Box<dyn Error>> {
    let mut session = Session::card(transport);
    let identity = session.identity()?;
    session.close()?;

    print_identity(&identity);
    Ok(())
}

/// Run AKA on the card and print the outcome
pub fn aka_command<T: CardTransport + 'static>(
    transport: T,
    challenge: &ChallengeArgs,
) -> Result<(), Box<dyn Error>> {
    let challenge = challenge.parse()?;
    let mut session = Session::card(transport);
    let outcome = session.authenticate(&challenge.rand, &challenge.autn)?;
    session.close()?;

    print_outcome(&outcome);
    Ok(())
}

/// Run the GSM algorithm on the card and print SRES and Kc
pub fn gsm_command<T: CardTransport + 'static>(
    transport: T,
    rand: &str,
) -> Result<(), Box<dyn Error>> {
    let rand = Challenge::rand_from_hex(rand)?;
    let mut session = Session::card(transport);
    let result = session.gsm_authenticate(&rand)?;
    session.close()?;

    println!("{}", success("GSM authentication complete"));
    println!(
        "{}",
        key_value_box(
            "GSM result",
            vec![
                ("SRES", hex::encode(result.sres())),
                ("Kc", hex::encode(result.kc())),
            ],
        )
    );
    Ok(())
}

/// Run AKA on a software card and print the outcome
pub fn soft_aka_command(
    config: SoftUsimConfig,
    challenge: &ChallengeArgs,
) -> Result<(), Box<dyn Error>> {
    let challenge = challenge.parse()?;
    let mut session = Session::software(config);

    print_identity(&session.identity()?);
    let outcome = session.authenticate(&challenge.rand, &challenge.autn)?;
    print_outcome(&outcome);
    Ok(())
}

fn print_identity(identity: &Identity) {
    let unknown = || "-".to_string();
    println!(
        "{}",
        key_value_box(
            "Subscriber identity",
            vec![
                ("IMSI", identity.imsi.clone()),
                ("MCC", identity.plmn.mcc.clone()),
                ("MNC", identity.plmn.mnc.clone()),
                ("ICCID", identity.iccid.clone().unwrap_or_else(unknown)),
                ("MSISDN", identity.msisdn.clone().unwrap_or_else(unknown)),
                ("IMEI", identity.imei.clone().unwrap_or_else(unknown)),
            ],
        )
    );
}

fn print_outcome(outcome: &AkaOutcome) {
    match outcome {
        AkaOutcome::Success(keys) => {
            println!("{}", success("AKA succeeded"));
            println!(
                "{}",
                key_value_box(
                    "AKA keys",
                    vec![
                        ("RES", hex::encode(keys.res())),
                        ("CK", hex::encode(keys.ck())),
                        ("IK", hex::encode(keys.ik())),
                    ],
                )
            );
        }
        AkaOutcome::SyncFailure(auts) => {
            println!("{}", warning("Sequence number out of range, resynchronisation required"));
            println!("{}", key_value_box("Resync", vec![("AUTS", auts.to_string())]));
        }
    }
}
