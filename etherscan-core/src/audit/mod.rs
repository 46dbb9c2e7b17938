//! Compares the actions listed in the Etherscan API documentation with the
//! actions the client implements, and reports the ones not yet covered.

use etherscan_sdk::objects::actions::IMPLEMENTED_ACTIONS;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub const DOCS_BASE_URL: &str = "https://docs.etherscan.io/api-endpoints/";

/// Documentation pages that list API actions.
pub const DOC_PAGES: &[&str] = &[
    "accounts",
    "contracts",
    "transactions",
    "blocks",
    "logs",
    "geth-parity-proxy",
    "tokens",
    "gas-tracker",
    "stats",
];

const ACTION_PATTERN: &str = r"&(?:amp;)?action=([A-Za-z0-9_]+)";

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("documentation page {page} answered {status}")]
    Status { page: String, status: reqwest::StatusCode },

    #[error("invalid action pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Report written by [`save_missing_calls`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCalls {
    pub missing_calls: Vec<String>,
}

/// Every `&action=NAME` mentioned in a documentation page.
pub fn extract_actions(html: &str) -> Result<BTreeSet<String>, AuditError> {
    let pattern = Regex::new(ACTION_PATTERN)?;
    Ok(pattern
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_owned())
        .collect())
}

/// Documented actions that are not in `implemented`, sorted.
pub fn missing_calls(documented: &BTreeSet<String>, implemented: &[&str]) -> Vec<String> {
    documented
        .iter()
        .filter(|action| !implemented.contains(&action.as_str()))
        .cloned()
        .collect()
}

/// Fetch every page in [`DOC_PAGES`] below `base_url` and collect the actions.
pub async fn fetch_documented_actions(http: &reqwest::Client, base_url: &str) -> Result<BTreeSet<String>, AuditError> {
    let mut actions = BTreeSet::new();
    for page in DOC_PAGES {
        let url = format!("{base_url}{page}");
        let resp = http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AuditError::Status {
                page: (*page).to_owned(),
                status,
            });
        }
        let found = extract_actions(&resp.text().await?)?;
        debug!(page, found = found.len(), "Scanned documentation page");
        actions.extend(found);
    }
    Ok(actions)
}

/// Documented actions the client does not implement.
pub async fn find_missing_calls(http: &reqwest::Client, base_url: &str) -> Result<Vec<String>, AuditError> {
    let documented = fetch_documented_actions(http, base_url).await?;
    let missing = missing_calls(&documented, IMPLEMENTED_ACTIONS);
    info!(
        documented = documented.len(),
        missing = missing.len(),
        "Compared documented actions with the client"
    );
    Ok(missing)
}

/// Write `calls` as a YAML document `missing_calls: [...]`.
pub async fn save_missing_calls(path: &Path, calls: Vec<String>) -> Result<(), AuditError> {
    let report = MissingCalls { missing_calls: calls };
    let yaml = serde_yaml::to_string(&report)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, yaml).await?;
    info!(path = %path.display(), "Saved missing calls");
    Ok(())
}
