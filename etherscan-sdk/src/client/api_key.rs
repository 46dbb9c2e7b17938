/// Environment variable consulted when no API key is given explicitly.
pub const API_KEY_ENV: &str = "ETHERSCAN_KEY";

/// Pick the API key: the explicit one if non-empty, else `ETHERSCAN_KEY`.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    resolve_api_key_with(explicit, |name| std::env::var(name).ok())
}

pub fn resolve_api_key_with(explicit: Option<String>, lookup: impl FnOnce(&str) -> Option<String>) -> Option<String> {
    explicit
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()))
}
