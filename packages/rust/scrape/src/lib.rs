//! Scraping capability contract, Firecrawl backend, and the per-site
//! multi-pass scrape orchestrator.
//!
//! This crate provides:
//! - [`capability`] — the injected [`ScrapeCapability`] trait and its wire types
//! - [`firecrawl`] — a reqwest-backed capability against the Firecrawl API
//! - [`orchestrator`] — three-pass scraping and result merging for one site

pub mod capability;
pub mod firecrawl;
pub mod orchestrator;

pub use capability::{
    ExtractionSpec, RawScrapeResult, ScrapeCapability, ScrapeFormat, ScrapeRequest,
};
pub use firecrawl::FirecrawlCapability;
pub use orchestrator::{ScrapeOptions, SiteScrape, StructuredExtract, scrape_website};
