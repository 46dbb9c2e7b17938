use super::ParseError;
use serde::{Deserialize, Serialize};

/// Decode a JSON-RPC quantity such as `"0x4a817c800"`.
pub fn parse_hex_quantity(text: &str) -> Result<u128, ParseError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .filter(|digits| !digits.is_empty())
        .ok_or_else(|| ParseError::HexQuantity(text.to_owned()))?;
    u128::from_str_radix(digits, 16).map_err(|_| ParseError::HexQuantity(text.to_owned()))
}

/// Encode a block number as a JSON-RPC quantity tag.
pub fn to_hex_quantity(value: u64) -> String {
    format!("{value:#x}")
}

/// Block returned by `eth_getBlockByNumber` with full transaction objects.
///
/// Quantities stay hex-encoded; pending blocks have no number, hash or miner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: Option<String>,
    pub hash: Option<String>,
    pub parent_hash: String,
    pub timestamp: String,
    pub miner: Option<String>,
    pub gas_limit: String,
    pub gas_used: String,
    #[serde(default)]
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
}

impl Block {
    pub fn block_number(&self) -> Result<Option<u64>, ParseError> {
        self.number
            .as_deref()
            .map(|number| {
                let value = parse_hex_quantity(number)?;
                u64::try_from(value).map_err(|_| ParseError::HexQuantity(number.to_owned()))
            })
            .transpose()
    }

    pub fn unix_timestamp(&self) -> Result<i64, ParseError> {
        let value = parse_hex_quantity(&self.timestamp)?;
        i64::try_from(value).map_err(|_| ParseError::HexQuantity(self.timestamp.clone()))
    }
}
