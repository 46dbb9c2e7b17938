//! Subcommand execution. Every command prints its result as pretty JSON.

use crate::config::LoadedConfig;
use crate::prompt::prompt_api_key;
use clap::{Args, Subcommand};
use etherscan_core::audit::{self, DOCS_BASE_URL};
use etherscan_core::cache::{CacheBackend, SqliteCache, open_cache};
use etherscan_sdk::client::{Client, resolve_api_key};
use etherscan_sdk::objects::account::{Sort, TokenTransactionQuery, TransactionQuery, TransactionType};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// ETH balance of an address, in wei
    Balance { address: String },

    /// ETH balances of several addresses, in wei
    Balances {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Normal (or internal) transactions of an address
    Txs {
        address: String,
        /// List internal transactions instead of normal ones
        #[arg(long)]
        internal: bool,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// ERC-20 transfer events by token contract and/or address
    TokenTxs {
        #[arg(long)]
        contract: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Current gas price, in wei
    GasPrice,

    /// Most recent block number
    BlockNumber,

    /// Block with its transactions
    Block { number: u64 },

    /// Last ETH price in BTC and USD
    EthPrice,

    /// Total ETH supply, in wei
    EthSupply,

    /// List documented API actions the client does not implement yet
    MissingCalls {
        /// Also write the list as YAML to this file
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = DOCS_BASE_URL)]
        docs_url: String,
    },

    /// Delete every cached response
    ClearCache,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct RangeArgs {
    #[arg(long, default_value_t = 0)]
    start_block: u64,
    #[arg(long, default_value_t = TransactionQuery::DEFAULT_END_BLOCK)]
    end_block: u64,
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Page size
    #[arg(long, default_value_t = TransactionQuery::DEFAULT_LIMIT)]
    limit: u32,
    #[arg(long, default_value = "asc")]
    sort: Sort,
}

impl From<RangeArgs> for TransactionQuery {
    fn from(args: RangeArgs) -> Self {
        Self {
            start_block: args.start_block,
            end_block: args.end_block,
            page: args.page,
            limit: args.limit,
            sort: args.sort,
        }
    }
}

/// Wei amounts exceed `u64`, so they are printed through typed structs
/// rather than `serde_json::Value`.
#[derive(Serialize)]
struct Amount<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(flatten)]
    value: AmountValue,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum AmountValue {
    Balance(u128),
    GasPrice(u128),
    EthSupply(u128),
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn build_client(config: LoadedConfig) -> anyhow::Result<Client> {
    let api_key = match resolve_api_key(config.api_key) {
        Some(key) => Some(key),
        None => prompt_api_key()?,
    };

    let mut builder = Client::builder().network(config.network);
    if let Some(api_key) = api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(cache) = open_cache(&config.cache).await? {
        builder = builder.cache(cache);
    }
    Ok(builder.build()?)
}

pub async fn run(command: Command, config: LoadedConfig) -> anyhow::Result<()> {
    match command {
        Command::MissingCalls { output, docs_url } => {
            let missing = audit::find_missing_calls(&reqwest::Client::new(), &docs_url).await?;
            if let Some(path) = output {
                audit::save_missing_calls(&path, missing.clone()).await?;
            }
            print_json(&json!({ "missing_calls": missing }))
        }
        Command::ClearCache => {
            if config.cache.backend != CacheBackend::Sqlite {
                info!(backend = ?config.cache.backend, "Nothing persisted to clear");
                return Ok(());
            }
            let cache = SqliteCache::open(&config.cache.path, config.cache.expire_after).await?;
            etherscan_sdk::client::ResponseCache::clear(&cache).await?;
            cache.close().await;
            info!(path = %config.cache.path.display(), "Response cache cleared");
            Ok(())
        }
        command => {
            let client = build_client(config).await?;
            run_api_command(command, &client).await
        }
    }
}

async fn run_api_command(command: Command, client: &Client) -> anyhow::Result<()> {
    match command {
        Command::Balance { address } => {
            let balance = client.account().get_eth_balance(&address).await?;
            print_json(&Amount {
                address: Some(&address),
                value: AmountValue::Balance(balance),
            })
        }
        Command::Balances { addresses } => {
            let balances = client.account().get_eth_balances(addresses.as_slice()).await?;
            print_json(&balances)
        }
        Command::Txs {
            address,
            internal,
            range,
        } => {
            let transaction_type = if internal {
                TransactionType::Internal
            } else {
                TransactionType::Normal
            };
            let transactions = client
                .account()
                .get_transactions_by_address(&address, transaction_type, &range.into())
                .await?;
            print_json(&transactions)
        }
        Command::TokenTxs {
            contract,
            address,
            range,
        } => {
            let query = TokenTransactionQuery {
                contract_address: contract,
                address,
                range: range.into(),
            };
            let transfers = client.account().get_token_transactions(&query).await?;
            print_json(&transfers)
        }
        Command::GasPrice => {
            let gas_price = client.proxy().get_gas_price().await?;
            print_json(&Amount {
                address: None,
                value: AmountValue::GasPrice(gas_price),
            })
        }
        Command::BlockNumber => {
            let block_number = client.proxy().get_block_number().await?;
            print_json(&json!({ "block_number": block_number }))
        }
        Command::Block { number } => match client.proxy().get_block_by_number(number).await? {
            Some(block) => print_json(&block),
            None => anyhow::bail!("block {number} not found"),
        },
        Command::EthPrice => {
            let price = client.stats().get_eth_price().await?;
            print_json(&price)
        }
        Command::EthSupply => {
            let supply = client.stats().get_eth_supply().await?;
            print_json(&Amount {
                address: None,
                value: AmountValue::EthSupply(supply),
            })
        }
        Command::MissingCalls { .. } | Command::ClearCache => Ok(()),
    }
}
