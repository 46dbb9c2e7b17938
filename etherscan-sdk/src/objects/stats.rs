use super::{ParseError, parse_integer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Last ETH price, as the API sends it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEthPrice {
    pub ethbtc: String,
    pub ethbtc_timestamp: String,
    pub ethusd: String,
    pub ethusd_timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthPrice {
    pub ethbtc: Decimal,
    pub ethbtc_timestamp: i64,
    pub ethusd: Decimal,
    pub ethusd_timestamp: i64,
}

impl TryFrom<RawEthPrice> for EthPrice {
    type Error = ParseError;

    fn try_from(raw: RawEthPrice) -> Result<Self, Self::Error> {
        Ok(Self {
            ethbtc: parse_decimal("ethbtc", &raw.ethbtc)?,
            ethbtc_timestamp: parse_timestamp("ethbtc_timestamp", &raw.ethbtc_timestamp)?,
            ethusd: parse_decimal("ethusd", &raw.ethusd)?,
            ethusd_timestamp: parse_timestamp("ethusd_timestamp", &raw.ethusd_timestamp)?,
        })
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ParseError> {
    value.trim().parse().map_err(|_| ParseError::Decimal {
        field,
        value: value.to_owned(),
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<i64, ParseError> {
    let seconds = parse_integer(field, value)?;
    i64::try_from(seconds).map_err(|_| ParseError::Integer {
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_eth_price_conversion() {
        let raw: RawEthPrice = serde_json::from_str(
            r#"{"ethbtc":"0.06116","ethbtc_timestamp":"1624961308","ethusd":"2149.18","ethusd_timestamp":"1624961305"}"#,
        )
        .unwrap();
        let price = EthPrice::try_from(raw).unwrap();
        assert_eq!(price.ethbtc, Decimal::from_str("0.06116").unwrap());
        assert_eq!(price.ethusd, Decimal::from_str("2149.18").unwrap());
        assert_eq!(price.ethbtc_timestamp, 1_624_961_308);
        assert_eq!(price.ethusd_timestamp, 1_624_961_305);
    }

    #[test]
    fn test_eth_price_rejects_garbage() {
        let raw = RawEthPrice {
            ethbtc: "n/a".to_string(),
            ethbtc_timestamp: "1".to_string(),
            ethusd: "1".to_string(),
            ethusd_timestamp: "1".to_string(),
        };
        assert!(matches!(
            EthPrice::try_from(raw),
            Err(ParseError::Decimal { field: "ethbtc", .. })
        ));
    }
}
