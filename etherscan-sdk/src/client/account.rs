use super::{BaseClient, ClientError};
use crate::objects::account::{BalanceEntry, TokenTransactionQuery, TransactionQuery, TransactionType};
use crate::objects::{actions, parse_integer};
use crate::record::Record;
use std::collections::BTreeMap;
use std::sync::Arc;

/// `module=account`: balances and transaction lists.
#[derive(Debug, Clone)]
pub struct AccountClient {
    base: Arc<BaseClient>,
}

impl AccountClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    async fn call(
        &self,
        action: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<serde_json::Value, ClientError> {
        self.base.call(actions::MODULE_ACCOUNT, action, params).await
    }

    /// ETH balance of `address`, in wei.
    pub async fn get_eth_balance(&self, address: &str) -> Result<u128, ClientError> {
        let result = self.call(actions::BALANCE, vec![("address", address.to_owned())]).await?;
        let balance: String = serde_json::from_value(result)?;
        Ok(parse_integer("balance", &balance)?)
    }

    /// ETH balances of several addresses, in wei, keyed by address.
    pub async fn get_eth_balances<S: AsRef<str>>(&self, addresses: &[S]) -> Result<BTreeMap<String, u128>, ClientError> {
        if addresses.is_empty() {
            return Err(ClientError::InvalidParams("at least one address is required".to_owned()));
        }
        let joined = addresses.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        let result = self.call(actions::BALANCE_MULTI, vec![("address", joined)]).await?;
        let rows: Vec<BalanceEntry> = serde_json::from_value(result)?;

        let mut balances = BTreeMap::new();
        for row in rows {
            let balance = parse_integer("balance", &row.balance)?;
            balances.insert(row.account, balance);
        }
        Ok(balances)
    }

    /// Normal or internal transactions of `address`.
    pub async fn get_transactions_by_address(
        &self,
        address: &str,
        transaction_type: TransactionType,
        query: &TransactionQuery,
    ) -> Result<Vec<Record>, ClientError> {
        let mut params = vec![("address", address.to_owned())];
        params.extend(query.params());
        let result = self.call(transaction_type.action(), params).await?;
        into_records(result)
    }

    /// ERC-20 transfer events, filtered by token contract, by address, or both.
    pub async fn get_token_transactions(&self, query: &TokenTransactionQuery) -> Result<Vec<Record>, ClientError> {
        let params = query.params().ok_or_else(|| {
            ClientError::InvalidParams("`contract_address` and `address` cannot both be empty".to_owned())
        })?;
        let result = self.call(actions::TOKEN_TX, params).await?;
        into_records(result)
    }
}

fn into_records(result: serde_json::Value) -> Result<Vec<Record>, ClientError> {
    if result.is_null() {
        return Ok(Vec::new());
    }
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_value(result)?;
    Ok(rows.into_iter().map(Record::from_raw).collect())
}
