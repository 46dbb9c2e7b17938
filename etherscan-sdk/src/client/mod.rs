//! HTTP client for the Etherscan.io API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.
//!
//! [`Client`] hands out one sub-client per API module. All of them share a
//! single [`BaseClient`], which owns the HTTP connection pool, the API key
//! and the optional [`ResponseCache`].

mod account;
mod api_key;
mod base;
mod cache;
mod proxy;
mod stats;

pub use account::AccountClient;
pub use api_key::{API_KEY_ENV, resolve_api_key, resolve_api_key_with};
pub use base::{BaseClient, USER_AGENT};
pub use cache::{CacheError, ResponseCache, cache_key};
pub use proxy::ProxyClient;
pub use stats::StatsClient;

use crate::objects::{Network, ParseError, ResponseError};
use reqwest::StatusCode;
use std::sync::Arc;
use url::Url;

/// Errors produced by the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("http status {status}, body: {body}")]
    Status { status: StatusCode, body: String },

    /// The API answered with a failure envelope.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field of the result could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The API URL could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The call was rejected before anything was sent.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// Entry point: one sub-client per API module.
///
/// Cloning is cheap; every clone shares the same [`BaseClient`].
#[derive(Debug, Clone)]
pub struct Client {
    account: AccountClient,
    stats: StatsClient,
    proxy: ProxyClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Mainnet client without a cache. The API key falls back to `ETHERSCAN_KEY`.
    pub fn new(api_key: Option<String>) -> Result<Self, ClientError> {
        let mut builder = Self::builder();
        if let Some(api_key) = api_key {
            builder = builder.api_key(api_key);
        }
        builder.build()
    }

    fn from_base(base: Arc<BaseClient>) -> Self {
        Self {
            account: AccountClient::new(base.clone()),
            stats: StatsClient::new(base.clone()),
            proxy: ProxyClient::new(base),
        }
    }

    /// `module=account`
    pub fn account(&self) -> &AccountClient {
        &self.account
    }

    /// `module=stats`
    pub fn stats(&self) -> &StatsClient {
        &self.stats
    }

    /// `module=proxy`
    pub fn proxy(&self) -> &ProxyClient {
        &self.proxy
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    network: Network,
    api_url: Option<String>,
    cache: Option<Arc<dyn ResponseCache>>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Override the endpoint chosen by [`network`](Self::network).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let api_url = match self.api_url {
            Some(api_url) => Url::parse(&api_url)?,
            None => Url::parse(self.network.api_url())?,
        };
        let base = BaseClient::new(
            self.http.unwrap_or_default(),
            api_url,
            resolve_api_key(self.api_key),
            self.cache,
        );
        Ok(Client::from_base(Arc::new(base)))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A stand-in Etherscan API served by axum on a random local port.

    use axum::extract::State;
    use axum::http::{HeaderMap, header};
    use axum::{Form, Json, Router, routing::post};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    pub struct MockApi {
        pub hits: Arc<AtomicUsize>,
        pub requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
        pub user_agents: Arc<Mutex<Vec<String>>>,
    }

    impl MockApi {
        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub async fn last_request(&self) -> HashMap<String, String> {
            self.requests.lock().await.last().cloned().unwrap_or_default()
        }

        pub async fn user_agents(&self) -> Vec<String> {
            self.user_agents.lock().await.clone()
        }
    }

    async fn answer(
        State(api): State<MockApi>,
        headers: HeaderMap,
        Form(params): Form<HashMap<String, String>>,
    ) -> Json<Value> {
        api.hits.fetch_add(1, Ordering::SeqCst);
        api.requests.lock().await.push(params.clone());
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        api.user_agents.lock().await.push(user_agent.to_owned());

        if params.get("apikey").map(String::as_str) == Some("bad-key") {
            return Json(json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"}));
        }

        let action = params.get("action").cloned().unwrap_or_default();
        let body = match action.as_str() {
            "balance" => json!({"status": "1", "message": "OK", "result": "40891626854930000000000"}),
            "balancemulti" => json!({"status": "1", "message": "OK", "result": [
                {"account": "0xddbd2b932c763ba5b1b7ae3b362eac3e8d40121a", "balance": "40891626854930000000000"},
                {"account": "0x63a9975ba31b0b9626b34300f7f627147df1f526", "balance": "332567136222827062478"}
            ]}),
            "txlist" | "txlistinternal" | "tokentx" => {
                if params.get("address").map(String::as_str) == Some("0x0000000000000000000000000000000000000000") {
                    json!({"status": "0", "message": "No transactions found", "result": []})
                } else {
                    json!({"status": "1", "message": "OK", "result": [{
                        "blockNumber": "14923678",
                        "timeStamp": "1654646411",
                        "hash": "0xc9a6f9a4",
                        "from": "0x9aa99c23f67c81701c772b106b4f83f6e858dd2e",
                        "to": "0x63a9975ba31b0b9626b34300f7f627147df1f526",
                        "value": "1000000",
                        "isError": "0",
                        "txreceipt_status": "1",
                        "contractAddress": ""
                    }]})
                }
            }
            "ethprice" => json!({"status": "1", "message": "OK", "result": {
                "ethbtc": "0.06116",
                "ethbtc_timestamp": "1624961308",
                "ethusd": "2149.18",
                "ethusd_timestamp": "1624961305"
            }}),
            "ethsupply" => json!({"status": "1", "message": "OK", "result": "116487067186500000000000000"}),
            "eth_gasPrice" => json!({"jsonrpc": "2.0", "id": 73, "result": "0x4a817c800"}),
            "eth_blockNumber" => json!({"jsonrpc": "2.0", "id": 83, "result": "0xe3c5a1"}),
            "eth_getBlockByNumber" => match params.get("tag").map(String::as_str) {
                Some("0x10d4f") => json!({"jsonrpc": "2.0", "id": 1, "result": {
                    "number": "0x10d4f",
                    "hash": "0x7eb7c23a5ac2f2d70aa1ba4e5c56d89de5ac993590e5f6e79c394e290d998ba8",
                    "parentHash": "0x1e77d8f1267348b516ebc4f4da1e2aa59f85f0cbd853949500ffac8bfc38ba14",
                    "timestamp": "0x55c9ea07",
                    "miner": "0x52bc44d5378309ee2abf1539bf71de1b7d7be3b5",
                    "gasLimit": "0x2fefd8",
                    "gasUsed": "0x5208",
                    "transactions": [{"hash": "0xa3ece39ae137617669c6933b7578b94e705e765683f260fcfe30eaa41932610f"}]
                }}),
                _ => json!({"jsonrpc": "2.0", "id": 1, "result": null}),
            },
            _ => json!({"status": "0", "message": "NOTOK", "result": "Error! Missing Or invalid Action name"}),
        };
        Json(body)
    }

    /// Serve the mock API and return its URL together with the shared state.
    pub async fn spawn_mock_api() -> (String, MockApi) {
        let api = MockApi::default();
        let router = Router::new().route("/api", post(answer)).with_state(api.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/api"), api)
    }
}
