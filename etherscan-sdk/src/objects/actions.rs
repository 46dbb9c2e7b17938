//! Module and action names sent in the `module`/`action` parameters.

pub const MODULE_ACCOUNT: &str = "account";
pub const MODULE_STATS: &str = "stats";
pub const MODULE_PROXY: &str = "proxy";

pub const BALANCE: &str = "balance";
pub const BALANCE_MULTI: &str = "balancemulti";
pub const TX_LIST: &str = "txlist";
pub const TX_LIST_INTERNAL: &str = "txlistinternal";
pub const TOKEN_TX: &str = "tokentx";
pub const ETH_PRICE: &str = "ethprice";
pub const ETH_SUPPLY: &str = "ethsupply";
pub const ETH_GAS_PRICE: &str = "eth_gasPrice";
pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
pub const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

/// Every action the client implements.
pub const IMPLEMENTED_ACTIONS: &[&str] = &[
    BALANCE,
    BALANCE_MULTI,
    TX_LIST,
    TX_LIST_INTERNAL,
    TOKEN_TX,
    ETH_PRICE,
    ETH_SUPPLY,
    ETH_GAS_PRICE,
    ETH_BLOCK_NUMBER,
    ETH_GET_BLOCK_BY_NUMBER,
];
