//! etherscan
//!
//! Command-line front end for the Etherscan.io API.

mod commands;
mod config;
mod prompt;
mod shutdown;

use clap::Parser;
use commands::Command;
use config::{ConfigLoader, Overrides};
use etherscan_core::cache::CacheBackend;
use etherscan_sdk::Network;
use etherscan_sdk::client::API_KEY_ENV;
use shutdown::shutdown_signal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "./etherscan.toml";

/// Query the Etherscan.io API
#[derive(Parser, Debug)]
#[command(name = "etherscan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Etherscan API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Network to query (mainnet, ropsten, kovan, rinkeby)
    #[arg(short, long)]
    network: Option<Network>,

    /// Response cache backend (sqlite, memory, none)
    #[arg(long)]
    cache: Option<CacheBackend>,

    /// Seconds a cached response stays fresh
    #[arg(long)]
    cache_expire_after: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::debug!("Starting etherscan v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let required = args.config.is_some();
    let config_path = args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let overrides = Overrides {
        api_key: args.api_key,
        network: args.network,
        cache_backend: args.cache,
        expire_after_secs: args.cache_expire_after,
    };
    let config = ConfigLoader::new(&config_path, required, overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    run_until_shutdown(commands::run(args.command, config), shutdown_signal()).await
}

/// Run `command` unless `shutdown` completes first, in which case the
/// command is dropped and an error is returned so the exit status is non-zero.
async fn run_until_shutdown(
    command: impl Future<Output = anyhow::Result<()>>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    tokio::select! {
        result = command => result,
        _ = shutdown => {
            tracing::warn!("Interrupted before the command finished");
            anyhow::bail!("interrupted")
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,etherscan_cli=info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
