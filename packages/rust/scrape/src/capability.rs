//! The injected scraping capability contract.
//!
//! The pipeline never fetches a page itself; all network, rendering, and
//! structured extraction goes through a [`ScrapeCapability`] supplied by the
//! caller — a real backend ([`crate::FirecrawlCapability`]), a test double,
//! or nothing at all.

use std::future::Future;

use serde::{Deserialize, Serialize};

use profilescout_shared::Result;

/// Output formats a capability can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeFormat {
    /// Rendered page content as Markdown text.
    Markdown,
    /// LLM-driven structured extraction guided by an [`ExtractionSpec`].
    Extract,
}

/// Prompt and JSON schema guiding a structured extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSpec {
    pub prompt: String,
    pub schema: serde_json::Value,
}

/// One request against the scraping capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Absolute URL to scrape.
    pub url: String,
    /// Requested output formats.
    pub formats: Vec<ScrapeFormat>,
    /// Ask the backend to drop navigation/footer chrome.
    pub only_main_content: bool,
    /// Render-settle delay for client-rendered pages, in ms.
    pub wait_for_ms: u64,
    /// Structured-extraction instructions, when `Extract` is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionSpec>,
}

/// Raw capability output: rendered text plus an optional free-shape
/// extraction object. Never persisted directly — always normalized first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScrapeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<serde_json::Value>,
}

/// An externally supplied scrape/render/extract function.
///
/// `Ok(None)` means the backend could not produce content for this request
/// (timeout, auth, rate limit, empty page); `Err` is reserved for faults the
/// caller may want to distinguish. Either way the pipeline degrades to
/// skipping the site rather than failing the run.
pub trait ScrapeCapability: Send + Sync {
    fn scrape(
        &self,
        request: &ScrapeRequest,
    ) -> impl Future<Output = Result<Option<RawScrapeResult>>> + Send;
}
