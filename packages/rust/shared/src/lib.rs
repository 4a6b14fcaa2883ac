//! Shared types, error model, and configuration for ProfileScout.
//!
//! This crate is the foundation depended on by all other ProfileScout crates.
//! It provides:
//! - [`ProfileScoutError`] — the unified error type
//! - Domain types ([`Profile`], [`WebsiteInsight`], [`EnrichmentSummary`], ...)
//! - Configuration ([`AppConfig`], [`EnrichmentOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CacheConfig, EnrichmentConfig, EnrichmentOptions, FirecrawlConfig,
    MAX_WEBSITES_CAP, cache_root, config_dir, config_file_path, firecrawl_api_key, init_config,
    load_config, load_config_from,
};
pub use error::{ProfileScoutError, Result};
pub use types::{
    CombinedInsights, EnrichedProfile, EnrichmentSummary, PersonalInfo, Profile,
    ProfessionalInfo, Repo, WebsiteEnrichment, WebsiteInsight, WebsiteType, dedup_exact,
    union_into,
};
