use crate::config::Settings;
use crate::domain::contract::UniverseResponse;
use crate::domain::stock::StockCandidate;
use crate::universe::StockUniverseProvider;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_PATH: &str = "/v1/universe";
const DEFAULT_RETRIES: u32 = 1;

/// Fetches the universe from an HTTP endpoint serving [`UniverseResponse`] JSON.
///
/// A failed request is retried up to `retries` more times. A payload that parses but breaks
/// the universe contract is returned at once without retrying.
#[derive(Debug, Clone)]
pub struct HttpJsonUniverseProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    path: String,
    retries: u32,
}

impl HttpJsonUniverseProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_universe_url()?.to_string();
        let api_key = settings.universe_api_key.clone();

        let timeout_secs = std::env::var("UNIVERSE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("UNIVERSE_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES);

        let path = std::env::var("UNIVERSE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Self::new(base_url, api_key, path, Duration::from_secs(timeout_secs), retries)
    }

    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        path: impl Into<String>,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build universe http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
            path: path.into(),
            retries,
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn fetch_once(&self) -> Result<UniverseResponse> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .send()
            .await
            .context("universe request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read universe response")?;

        if !status.is_success() {
            anyhow::bail!("universe provider HTTP {status}: {text}");
        }

        serde_json::from_str::<UniverseResponse>(&text)
            .context("failed to parse universe response into UniverseResponse")
    }
}

#[async_trait::async_trait]
impl StockUniverseProvider for HttpJsonUniverseProvider {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn get_candidates(&self) -> Result<Vec<StockCandidate>> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once().await {
                Ok(parsed) => return Ok(parsed.validate_and_into_candidates()?),
                Err(err) => {
                    if attempt >= self.retries {
                        return Err(err);
                    }
                    attempt += 1;
                    let backoff = Duration::from_millis(250 << (attempt - 1));
                    tracing::warn!(
                        attempt,
                        ?backoff,
                        error = %err,
                        "universe fetch failed; retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}
