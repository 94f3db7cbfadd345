use clap::{Parser, Subcommand};
use simauth_apdu_transport_pcsc::{ConnectStrategy, PcscConfig, PcscDeviceManager, PcscTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

use commands::*;
use utils::{ChallengeArgs, SoftArgs, reader};

#[derive(Parser)]
#[command(version, about = "Read SIM/USIM identities and run AKA or GSM authentication")]
struct Cli {
    /// Optional reader name to use (will auto-detect if not specified)
    #[arg(short, long)]
    reader: Option<String>,

    /// Debug level output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    ListReaders,

    /// Read IMSI, ICCID and MSISDN from the card
    Identity,

    /// Run UMTS AKA on the card
    Aka {
        #[command(flatten)]
        challenge: ChallengeArgs,
    },

    /// Run the GSM algorithm on the card
    Gsm {
        /// RAND, 32 hex characters
        #[arg(long, required = true)]
        rand: String,
    },

    /// Run UMTS AKA on a software card
    SoftAka {
        /// Credential algorithm: milenage or xor
        #[arg(long, default_value = "milenage")]
        algorithm: String,

        /// Subscriber key K, 32 hex characters
        #[arg(long, required = true)]
        k: String,

        /// Operator variant OP, 32 hex characters
        #[arg(long, group = "operator")]
        op: Option<String>,

        /// Precomputed OPc, 32 hex characters
        #[arg(long, group = "operator")]
        opc: Option<String>,

        /// IMSI, 15 digits
        #[arg(long, required = true)]
        imsi: String,

        /// IMEI, 15 digits
        #[arg(long)]
        imei: Option<String>,

        #[command(flatten)]
        challenge: ChallengeArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Commands::ListReaders => reader::list_readers(&PcscDeviceManager::new()?)?,
        Commands::Identity => identity_command(open_transport(cli.reader.as_deref())?)?,
        Commands::Aka { challenge } => {
            aka_command(open_transport(cli.reader.as_deref())?, challenge)?
        }
        Commands::Gsm { rand } => gsm_command(open_transport(cli.reader.as_deref())?, rand)?,
        Commands::SoftAka {
            algorithm,
            k,
            op,
            opc,
            imsi,
            imei,
            challenge,
        } => {
            let config = SoftArgs {
                algorithm,
                k,
                op: op.as_deref(),
                opc: opc.as_deref(),
                imsi,
                imei: imei.as_deref(),
            }
            .build()?;
            soft_aka_command(config, challenge)?
        }
    }

    Ok(())
}

/// Connect to the named reader, or to the first reader holding a card
fn open_transport(reader: Option<&str>) -> Result<PcscTransport, Box<dyn std::error::Error>> {
    let manager = PcscDeviceManager::new()?;
    let strategy = match reader {
        Some(name) => ConnectStrategy::Reader(name.to_string()),
        None => ConnectStrategy::AnyCard,
    };

    let transport = manager.connect_strategy(strategy, PcscConfig::default())?;
    info!("Using reader: {}", transport.reader_name());
    Ok(transport)
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .init();
}
