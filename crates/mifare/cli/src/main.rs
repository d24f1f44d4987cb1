//! Command-line interface for MIFARE Classic text records

use std::time::Duration;

use clap::{Parser, Subcommand};
use tagstore_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager};
use tagstore_mifare::{Key, StoreConfig, TagStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

use commands::*;
use utils::reader;

#[derive(Parser)]
#[command(version, about = "Read, write and erase text records on MIFARE Classic 1K cards")]
struct Cli {
    /// Reader name to use (first attached reader if not specified)
    #[arg(short, long)]
    reader: Option<String>,

    /// Debug level output
    #[arg(short, long)]
    verbose: bool,

    /// Hold the card exclusively and reset it when done
    #[arg(long)]
    exclusive: bool,

    /// Extra sector key in hex, tried before the built-in transport keys
    #[arg(short, long = "key", value_name = "HEX")]
    keys: Vec<Key>,

    /// Ignore repeated reads of the same card within this many milliseconds
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Read the UID and text of the next card presented
    Read {
        /// Give up after this many milliseconds (waits forever if not specified)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Write text to the next card presented
    Write {
        /// Text to store
        #[arg(required = true)]
        text: String,

        /// How long to wait for a card
        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,

        /// How long to wait for the card to be removed afterwards
        #[arg(long, default_value_t = 3_000)]
        absent_timeout_ms: u64,
    },

    /// Zero every data block of the next card presented
    Erase {
        /// Give up after this many milliseconds (waits forever if not specified)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// How long to wait for the card to be removed afterwards
        #[arg(long, default_value_t = 3_000)]
        absent_timeout_ms: u64,
    },

    /// Keep reading cards and print every new presentation
    Watch {
        /// Polling interval
        #[arg(long, default_value_t = 250)]
        interval_ms: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    // Create a PC/SC device manager
    let mut manager = PcscDeviceManager::new()?;

    if let Commands::List = cli.command {
        return reader::list_readers(&manager);
    }

    if cli.exclusive {
        manager = manager.with_config(PcscConfig::exclusive());
    }

    if let Some(name) = &cli.reader {
        reader::ensure_reader_exists(&manager, name)?;
        manager = manager.with_reader(name.clone());
    }

    let mut config = cli
        .keys
        .iter()
        .rev()
        .fold(StoreConfig::default(), |config, key| config.with_preferred_key(*key))
        .with_debounce_window(Duration::from_millis(cli.debounce_ms));
    if let Commands::Erase {
        absent_timeout_ms, ..
    } = cli.command
    {
        config = config.with_erase_absent_timeout(Duration::from_millis(absent_timeout_ms));
    }
    debug!(keys = config.keys.len(), "store configured");

    let store = TagStore::with_config(manager, config);

    match cli.command {
        Commands::List => unreachable!(), // Already handled above
        Commands::Read { timeout_ms } => {
            read_command(&store, timeout_ms.map(Duration::from_millis))?
        }
        Commands::Write {
            text,
            timeout_ms,
            absent_timeout_ms,
        } => write_command(
            &store,
            &text,
            Duration::from_millis(timeout_ms),
            Duration::from_millis(absent_timeout_ms),
        )?,
        Commands::Erase { timeout_ms, .. } => {
            erase_command(&store, timeout_ms.map(Duration::from_millis))?
        }
        Commands::Watch { interval_ms } => {
            watch_command(store, Duration::from_millis(interval_ms))?
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_ansi(true)
        .init();
}

/// `RUST_LOG` when set, otherwise everything at `level` and above
fn log_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
