//! # solpack-cli
//!
//! Command-line interface for contract-call parameter encoding.
//!
//! ## Usage
//!
//! ```bash
//! # Encoding
//! solpack encode '[{"type":"uint256","value":"255"},{"type":"string[]","value":["a","bb"]}]'
//! solpack pack bytes 0xaaaa
//! solpack call 'transfer(address,uint256)' '[{"type":"address","value":"0x..."},{"type":"uint256","value":"1"}]'
//! solpack selector 'balanceOf(address)'
//! solpack call 'totalSupply()' --to 0xc4ea73d428ab6589c36905d0f0b01f3051740ff8
//!
//! # Hashing
//! solpack hash '{"type":"uint256","value":"129831751235123"}'
//! solpack hash --raw '[{"type":"bool","value":"true"}]'
//!
//! # Utilities
//! solpack to-wei 1.5 --decimals 6
//! solpack from-wei 1337 --decimals 2
//! solpack checksum 0x3e8467983ba80734654208b274ebf01264526117
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// solpack CLI
#[derive(Parser, Debug)]
#[command(name = "solpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, used when RUST_LOG is unset (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode a JSON parameter list
    Encode(commands::encode::EncodeArgs),
    /// Keccak digest of a parameter list or a single value
    Hash(commands::encode::HashArgs),
    /// Pack one value
    Pack(commands::encode::PackArgs),
    /// Function selector of a signature
    Selector(commands::encode::SelectorArgs),
    /// Call data for a function and its arguments
    Call(commands::encode::CallArgs),
    /// Convert an amount to its smallest unit
    ToWei(commands::convert::ToWeiArgs),
    /// Convert an amount from its smallest unit
    FromWei(commands::convert::FromWeiArgs),
    /// EIP-55 checksum of an address
    Checksum(commands::checksum::ChecksumArgs),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set default decimals for unit conversions
        #[arg(long)]
        set_decimals: Option<u32>,
        /// Set default log filter
        #[arg(long)]
        set_log_level: Option<String>,
        /// Set whether encodings are printed with 0x
        #[arg(long)]
        set_prefix_output: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load();

    // Initialize logging on stderr so stdout stays parseable
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Using config {:?}", config);

    let result = match cli.command {
        Commands::Encode(cmd) => cmd.execute(&config, cli.json),
        Commands::Hash(cmd) => cmd.execute(&config, cli.json),
        Commands::Pack(cmd) => cmd.execute(&config, cli.json),
        Commands::Selector(cmd) => cmd.execute(&config, cli.json),
        Commands::Call(cmd) => cmd.execute(&config, cli.json),
        Commands::ToWei(cmd) => cmd.execute(&config, cli.json),
        Commands::FromWei(cmd) => cmd.execute(&config, cli.json),
        Commands::Checksum(cmd) => cmd.execute(&config, cli.json),
        Commands::Config {
            show,
            set_decimals,
            set_log_level,
            set_prefix_output,
        } => handle_config(
            &mut config,
            show,
            set_decimals,
            set_log_level,
            set_prefix_output,
            cli.json,
        ),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_decimals: Option<u32>,
    set_log_level: Option<String>,
    set_prefix_output: Option<bool>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(decimals) = set_decimals {
        if decimals > solpack_abi::MAX_DECIMALS {
            return Err(CliError::Config(format!(
                "decimals must be at most {}",
                solpack_abi::MAX_DECIMALS
            )));
        }
        config.decimals = decimals;
        modified = true;
    }

    if let Some(level) = set_log_level {
        EnvFilter::try_new(&level).map_err(|e| CliError::Config(e.to_string()))?;
        config.log_level = level;
        modified = true;
    }

    if let Some(prefix) = set_prefix_output {
        config.prefix_output = prefix;
        modified = true;
    }

    if modified {
        let path = config.save()?;
        tracing::info!("Saved configuration to {:?}", path);
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_u64("decimals", config.decimals.into())
            .field_bool("prefix_output", config.prefix_output)
            .field("log_level", &config.log_level)
            .message(&format!(
                "Decimals: {}\nPrefix output: {}\nLog level: {}",
                config.decimals, config.prefix_output, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .message(
                "Use --show to display config, or --set-decimals/--set-log-level/--set-prefix-output to modify",
            )
            .print();
    }

    Ok(())
}
