use super::{ParseError, actions};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which transaction list to query for an address.
pub enum TransactionType {
    #[default]
    Normal,
    Internal,
}

impl TransactionType {
    pub fn action(&self) -> &'static str {
        match self {
            TransactionType::Normal => actions::TX_LIST,
            TransactionType::Internal => actions::TX_LIST_INTERNAL,
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TransactionType::Normal),
            "internal" => Ok(TransactionType::Internal),
            _ => Err(ParseError::InvalidTransactionType(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

impl FromStr for Sort {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Sort::Asc),
            "desc" => Ok(Sort::Desc),
            _ => Err(ParseError::InvalidSort(s.to_owned())),
        }
    }
}

/// Block range and paging shared by the transaction list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub start_block: u64,
    pub end_block: u64,
    pub page: u32,
    /// Page size, sent as `offset`.
    pub limit: u32,
    pub sort: Sort,
}

impl TransactionQuery {
    pub const DEFAULT_END_BLOCK: u64 = 999_999_999;
    pub const DEFAULT_LIMIT: u32 = 1000;

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startblock", self.start_block.to_string()),
            ("endblock", self.end_block.to_string()),
            ("page", self.page.to_string()),
            ("offset", self.limit.to_string()),
            ("sort", self.sort.as_str().to_owned()),
        ]
    }
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            start_block: 0,
            end_block: Self::DEFAULT_END_BLOCK,
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            sort: Sort::Asc,
        }
    }
}

/// Query for ERC-20 token transfer events.
///
/// At least one of `contract_address` and `address` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransactionQuery {
    pub contract_address: Option<String>,
    pub address: Option<String>,
    #[serde(flatten)]
    pub range: TransactionQuery,
}

impl TokenTransactionQuery {
    pub fn by_contract(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: Some(contract_address.into()),
            ..Default::default()
        }
    }

    pub fn by_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Filter parameters, or `None` when neither filter is present.
    pub fn params(&self) -> Option<Vec<(&'static str, String)>> {
        let contract_address = self.contract_address.as_deref().filter(|s| !s.is_empty());
        let address = self.address.as_deref().filter(|s| !s.is_empty());
        if contract_address.is_none() && address.is_none() {
            return None;
        }

        let mut params = Vec::with_capacity(7);
        if let Some(contract_address) = contract_address {
            params.push(("contractaddress", contract_address.to_owned()));
        }
        if let Some(address) = address {
            params.push(("address", address.to_owned()));
        }
        params.extend(self.range.params());
        Some(params)
    }
}

/// One row of a `balancemulti` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: String,
    pub balance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_params() {
        let params = TransactionQuery::default().params();
        assert_eq!(
            params,
            vec![
                ("startblock", "0".to_string()),
                ("endblock", "999999999".to_string()),
                ("page", "1".to_string()),
                ("offset", "1000".to_string()),
                ("sort", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_query_requires_a_filter() {
        assert!(TokenTransactionQuery::default().params().is_none());
        let empty = TokenTransactionQuery {
            address: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.params().is_none());

        let params = TokenTransactionQuery::by_contract("0xdac17f958d2ee523a2206206994597c13d831ec7")
            .params()
            .unwrap();
        assert_eq!(params[0].0, "contractaddress");
        assert!(params.iter().all(|(key, _)| *key != "address"));
    }

    #[test]
    fn test_transaction_type_action() {
        assert_eq!(TransactionType::Normal.action(), "txlist");
        assert_eq!("internal".parse::<TransactionType>().unwrap().action(), "txlistinternal");
        assert!("erc20".parse::<TransactionType>().is_err());
    }
}
