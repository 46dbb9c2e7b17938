use super::{ClientError, ResponseCache, cache_key};
use crate::objects::EtherscanResponse;
use bytes::Bytes;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub const USER_AGENT: &str = "etherscan - rust wrapper around etherscan.io (github.com/neoctobers/etherscan)";

/// Transport shared by all module clients.
///
/// Every call is a form-encoded `POST` carrying `apikey`, `module`, `action`
/// and the call's own parameters. Parameters are assembled per call, so
/// concurrent calls never see each other's state.
pub struct BaseClient {
    http: Client,
    api_url: Url,
    api_key: Option<String>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl fmt::Debug for BaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseClient")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl BaseClient {
    pub fn new(http: Client, api_url: Url, api_key: Option<String>, cache: Option<Arc<dyn ResponseCache>>) -> Self {
        Self {
            http,
            api_url,
            api_key,
            cache,
        }
    }

    /// Call `module`/`action` and return the unwrapped `result` field.
    pub async fn call(
        &self,
        module: &'static str,
        action: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<serde_json::Value, ClientError> {
        let mut form: Vec<(&str, String)> = Vec::with_capacity(params.len() + 3);
        if let Some(api_key) = &self.api_key {
            form.push(("apikey", api_key.clone()));
        }
        form.push(("module", module.to_owned()));
        form.push(("action", action.to_owned()));
        form.extend(params);

        let key = self.cache.as_ref().map(|_| cache_key(&self.api_url, &form));

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            match cache.get(key).await {
                Ok(Some(body)) => {
                    debug!(module, action, "Response served from cache");
                    let response: EtherscanResponse = serde_json::from_slice(&body)?;
                    return Ok(response.into_result()?);
                }
                Ok(None) => {}
                Err(e) => warn!(module, action, error = %e, "Response cache lookup failed"),
            }
        }

        let body = self.send(&form).await?;
        let response: EtherscanResponse = serde_json::from_slice(&body)?;

        if response.is_notice() {
            warn!(
                module,
                action,
                message = response.message.as_deref().unwrap_or_default(),
                "Etherscan.io message"
            );
        }

        let result = response.into_result()?;

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Err(e) = cache.put(key, body).await {
                warn!(module, action, error = %e, "Failed to store response in cache");
            }
        }

        Ok(result)
    }

    async fn send(&self, form: &[(&str, String)]) -> Result<Bytes, ClientError> {
        let resp = self
            .http
            .post(self.api_url.clone())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.bytes().await?)
    }
}
