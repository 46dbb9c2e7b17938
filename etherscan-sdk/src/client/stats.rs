use super::{BaseClient, ClientError};
use crate::objects::stats::{EthPrice, RawEthPrice};
use crate::objects::{actions, parse_integer};
use std::sync::Arc;

/// `module=stats`: network-wide figures.
#[derive(Debug, Clone)]
pub struct StatsClient {
    base: Arc<BaseClient>,
}

impl StatsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Last ETH price in BTC and USD.
    pub async fn get_eth_price(&self) -> Result<EthPrice, ClientError> {
        let result = self.base.call(actions::MODULE_STATS, actions::ETH_PRICE, vec![]).await?;
        let raw: RawEthPrice = serde_json::from_value(result)?;
        Ok(EthPrice::try_from(raw)?)
    }

    /// Total ETH supply, in wei.
    pub async fn get_eth_supply(&self) -> Result<u128, ClientError> {
        let result = self.base.call(actions::MODULE_STATS, actions::ETH_SUPPLY, vec![]).await?;
        let supply: String = serde_json::from_value(result)?;
        Ok(parse_integer("ethsupply", &supply)?)
    }
}
