use super::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Networks served by Etherscan.io.
pub enum Network {
    #[default]
    Mainnet,
    Ropsten,
    Kovan,
    Rinkeby,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Ropsten => "ropsten",
            Network::Kovan => "kovan",
            Network::Rinkeby => "rinkeby",
        }
    }

    /// API endpoint for this network.
    pub fn api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.etherscan.io/api",
            Network::Ropsten => "https://api-ropsten.etherscan.io/api",
            Network::Kovan => "https://api-kovan.etherscan.io/api",
            Network::Rinkeby => "https://api-rinkeby.etherscan.io/api",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "ropsten" => Ok(Network::Ropsten),
            "kovan" => Ok(Network::Kovan),
            "rinkeby" => Ok(Network::Rinkeby),
            _ => Err(ParseError::InvalidNetwork(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_urls() {
        assert_eq!(Network::default().api_url(), "https://api.etherscan.io/api");
        assert_eq!(Network::Kovan.api_url(), "https://api-kovan.etherscan.io/api");
        for network in [Network::Ropsten, Network::Kovan, Network::Rinkeby] {
            assert_eq!(network.api_url(), format!("https://api-{network}.etherscan.io/api"));
        }
    }

    #[test]
    fn test_parse_network() {
        assert_eq!("Rinkeby".parse::<Network>().unwrap(), Network::Rinkeby);
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(
            "goerli".parse::<Network>(),
            Err(ParseError::InvalidNetwork("goerli".to_string()))
        );
    }
}
