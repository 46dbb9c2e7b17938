pub mod account;
pub mod actions;
pub mod network;
pub mod proxy;
pub mod stats;

pub use network::Network;

use serde::Deserialize;

/// Errors raised while turning Etherscan's string-typed payloads into values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid integer in `{field}`: {value:?}")]
    Integer { field: &'static str, value: String },

    #[error("invalid decimal in `{field}`: {value:?}")]
    Decimal { field: &'static str, value: String },

    #[error("invalid hex quantity: {0:?}")]
    HexQuantity(String),

    #[error("network could only be mainnet/ropsten/kovan/rinkeby, got {0:?}")]
    InvalidNetwork(String),

    #[error("transaction type must be \"normal\" or \"internal\", got {0:?}")]
    InvalidTransactionType(String),

    #[error("sort must be \"asc\" or \"desc\", got {0:?}")]
    InvalidSort(String),
}

/// Parse a base-10 integer the API sends as a string.
pub fn parse_integer(field: &'static str, value: &str) -> Result<u128, ParseError> {
    value.trim().parse().map_err(|_| ParseError::Integer {
        field,
        value: value.to_owned(),
    })
}

/// Response envelope shared by every Etherscan module.
///
/// Regular modules answer `{status, message, result}`. The `proxy` module
/// forwards JSON-RPC and answers `{jsonrpc, id, result}` or `{jsonrpc, id, error}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EtherscanResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// A response the API flagged as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("etherscan error: {message} ({result})")]
    Api { message: String, result: String },

    #[error("json-rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl EtherscanResponse {
    /// `status == "0"`. Etherscan also uses this for empty result sets
    /// ("No transactions found"), so it is not necessarily a failure.
    pub fn is_notice(&self) -> bool {
        self.status.as_deref() == Some("0")
    }

    /// Unwrap the `result` field, failing on `NOTOK` answers and JSON-RPC errors.
    ///
    /// A missing or `null` result is returned as [`serde_json::Value::Null`].
    pub fn into_result(self) -> Result<serde_json::Value, ResponseError> {
        if let Some(error) = self.error {
            return Err(ResponseError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = self.result.unwrap_or(serde_json::Value::Null);

        if self.status.as_deref() == Some("0") {
            let message = self.message.unwrap_or_default();
            if message.starts_with("NOTOK") {
                let result = match result {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                return Err(ResponseError::Api { message, result });
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response: EtherscanResponse =
            serde_json::from_value(json!({"status": "1", "message": "OK", "result": "40891626854930000000000"}))
                .unwrap();
        assert!(!response.is_notice());
        assert_eq!(response.into_result().unwrap(), json!("40891626854930000000000"));
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let response: EtherscanResponse =
            serde_json::from_value(json!({"status": "0", "message": "No transactions found", "result": []})).unwrap();
        assert!(response.is_notice());
        assert_eq!(response.into_result().unwrap(), json!([]));
    }

    #[test]
    fn test_notok_is_an_error() {
        let response: EtherscanResponse =
            serde_json::from_value(json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"})).unwrap();
        assert_eq!(
            response.into_result(),
            Err(ResponseError::Api {
                message: "NOTOK".to_string(),
                result: "Invalid API Key".to_string(),
            })
        );
    }

    #[test]
    fn test_rpc_envelope() {
        let response: EtherscanResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 83, "result": "0x10d4f"})).unwrap();
        assert_eq!(response.into_result().unwrap(), json!("0x10d4f"));

        let response: EtherscanResponse = serde_json::from_value(
            json!({"jsonrpc": "2.0", "id": 83, "error": {"code": -32602, "message": "invalid argument 0"}}),
        )
        .unwrap();
        assert_eq!(
            response.into_result(),
            Err(ResponseError::Rpc {
                code: -32602,
                message: "invalid argument 0".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("balance", "0").unwrap(), 0);
        assert_eq!(
            parse_integer("balance", "40891626854930000000000").unwrap(),
            40_891_626_854_930_000_000_000
        );
        assert!(matches!(
            parse_integer("balance", "12ab"),
            Err(ParseError::Integer { field: "balance", .. })
        ));
    }
}
