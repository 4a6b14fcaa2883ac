//! Firecrawl-backed implementation of the scraping capability.
//!
//! Talks to the Firecrawl `/v1/scrape` endpoint with bearer auth. Backend
//! failures (timeouts, invalid key, rate limits, malformed bodies) degrade
//! to `Ok(None)` — the pipeline treats the site as unscrapable and moves on.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use profilescout_shared::{AppConfig, ProfileScoutError, Result, firecrawl_api_key};

use crate::capability::{
    ExtractionSpec, RawScrapeResult, ScrapeCapability, ScrapeFormat, ScrapeRequest,
};

/// User-Agent string for scrape requests.
const USER_AGENT: &str = concat!("ProfileScout/", env!("CARGO_PKG_VERSION"));

/// Request body for the Firecrawl scrape endpoint (camelCase wire format).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FirecrawlPayload<'a> {
    url: &'a str,
    formats: &'a [ScrapeFormat],
    only_main_content: bool,
    wait_for: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    extract: Option<&'a ExtractionSpec>,
}

/// A [`ScrapeCapability`] backed by the Firecrawl HTTP API.
pub struct FirecrawlCapability {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FirecrawlCapability {
    /// Build a capability against the given endpoint with the given key.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                ProfileScoutError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a capability from application config.
    ///
    /// Returns `Ok(None)` when the configured API-key env var is unset or
    /// empty — enrichment then runs cache-only.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>> {
        match firecrawl_api_key(config) {
            Some(key) => Ok(Some(Self::new(
                key,
                config.firecrawl.base_url.clone(),
                config.firecrawl.timeout_secs,
            )?)),
            None => {
                debug!(
                    env = %config.firecrawl.api_key_env,
                    "no Firecrawl API key set, scraping capability unavailable"
                );
                Ok(None)
            }
        }
    }
}

impl ScrapeCapability for FirecrawlCapability {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Option<RawScrapeResult>> {
        let payload = FirecrawlPayload {
            url: &request.url,
            formats: &request.formats,
            only_main_content: request.only_main_content,
            wait_for: request.wait_for_ms,
            extract: request.extraction.as_ref(),
        };

        let response = match self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(url = %request.url, "firecrawl request timed out");
                return Ok(None);
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "firecrawl request failed");
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            // 401 = bad key, 429 = rate limited; neither is worth failing the run
            warn!(url = %request.url, %status, "firecrawl returned error status");
            return Ok(None);
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %request.url, error = %e, "unreadable firecrawl response body");
                return Ok(None);
            }
        };

        // The API wraps results in a `data` envelope; tolerate bare bodies too.
        let data = match body.get("data") {
            Some(data) => data.clone(),
            None => body,
        };

        match serde_json::from_value::<RawScrapeResult>(data) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) => {
                warn!(url = %request.url, error = %e, "malformed firecrawl scrape result");
                Ok(None)
            }
        }
    }
}
