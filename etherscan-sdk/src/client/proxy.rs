use super::{BaseClient, ClientError};
use crate::objects::{ParseError, actions};
use crate::objects::proxy::{Block, parse_hex_quantity, to_hex_quantity};
use std::sync::Arc;

/// `module=proxy`: Geth JSON-RPC calls forwarded by Etherscan.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base: Arc<BaseClient>,
}

impl ProxyClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    async fn quantity(&self, action: &'static str) -> Result<u128, ClientError> {
        let result = self.base.call(actions::MODULE_PROXY, action, vec![]).await?;
        let hex: String = serde_json::from_value(result)?;
        Ok(parse_hex_quantity(&hex)?)
    }

    /// Current gas price, in wei.
    pub async fn get_gas_price(&self) -> Result<u128, ClientError> {
        self.quantity(actions::ETH_GAS_PRICE).await
    }

    /// Number of the most recent block.
    pub async fn get_block_number(&self) -> Result<u64, ClientError> {
        let number = self.quantity(actions::ETH_BLOCK_NUMBER).await?;
        u64::try_from(number).map_err(|_| ClientError::Parse(ParseError::HexQuantity(format!("{number:#x}"))))
    }

    /// Block `block_number` with full transaction objects, or `None` if it
    /// does not exist yet.
    pub async fn get_block_by_number(&self, block_number: u64) -> Result<Option<Block>, ClientError> {
        let params = vec![("tag", to_hex_quantity(block_number)), ("boolean", "true".to_owned())];
        let result = self
            .base
            .call(actions::MODULE_PROXY, actions::ETH_GET_BLOCK_BY_NUMBER, params)
            .await?;
        Ok(serde_json::from_value(result)?)
    }
}
