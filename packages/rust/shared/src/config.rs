//! Application configuration for ProfileScout.
//!
//! User config lives at `~/.profilescout/profilescout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProfileScoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "profilescout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".profilescout";

/// Hard upper bound on sites processed per enrichment run.
pub const MAX_WEBSITES_CAP: usize = 3;

// ---------------------------------------------------------------------------
// Config structs (matching profilescout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Enrichment pipeline settings.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Firecrawl scraping backend settings.
    #[serde(default)]
    pub firecrawl: FirecrawlConfig,

    /// Website cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// `[enrichment]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Whether website enrichment runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum candidate sites processed per run (clamped to 1..=3).
    #[serde(default = "default_max_websites")]
    pub max_websites: usize,

    /// Cache freshness window in hours.
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: i64,

    /// Render-settle delay requested from the scraping capability, in ms.
    #[serde(default = "default_wait_for_ms")]
    pub wait_for_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_websites: default_max_websites(),
            cache_ttl_hours: default_cache_ttl_hours(),
            wait_for_ms: default_wait_for_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_max_websites() -> usize {
    1
}
fn default_cache_ttl_hours() -> i64 {
    24
}
fn default_wait_for_ms() -> u64 {
    5000
}

/// `[firecrawl]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirecrawlConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Scrape endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_key_env() -> String {
    "FIRECRAWL_API_KEY".into()
}
fn default_base_url() -> String {
    "https://api.firecrawl.dev/v1/scrape".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[cache]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root override; defaults to `~/.cache/profilescout/websites`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

// ---------------------------------------------------------------------------
// Runtime options (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime enrichment options — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct EnrichmentOptions {
    /// Whether enrichment runs at all; when false the profile passes
    /// through unchanged.
    pub enabled: bool,
    /// Sites processed per run, already clamped to 1..=3.
    pub max_websites: usize,
    /// Cache freshness window.
    pub cache_ttl: chrono::Duration,
    /// Whether to read/write the insight cache.
    pub use_cache: bool,
    /// Render-settle delay requested per scrape pass, in ms.
    pub wait_for_ms: u64,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for EnrichmentOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            enabled: config.enrichment.enabled,
            max_websites: config.enrichment.max_websites.clamp(1, MAX_WEBSITES_CAP),
            cache_ttl: chrono::Duration::hours(config.enrichment.cache_ttl_hours.max(0)),
            use_cache: true,
            wait_for_ms: config.enrichment.wait_for_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.profilescout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ProfileScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.profilescout/profilescout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Resolve the website cache root from config, falling back to the
/// platform cache directory.
pub fn cache_root(config: &AppConfig) -> Result<PathBuf> {
    if let Some(root) = &config.cache.root {
        return Ok(PathBuf::from(root));
    }
    let base = dirs::cache_dir()
        .ok_or_else(|| ProfileScoutError::config("could not determine cache directory"))?;
    Ok(base.join("profilescout").join("websites"))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ProfileScoutError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ProfileScoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ProfileScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ProfileScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ProfileScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the Firecrawl API key from the configured env var.
/// Returns `None` when unset or empty — the capability is then unavailable.
pub fn firecrawl_api_key(config: &AppConfig) -> Option<String> {
    match std::env::var(&config.firecrawl.api_key_env) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}
