//! CLI command definitions, routing, and tracing setup.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use profilescout_cache::InsightCache;
use profilescout_core::{EnrichProgress, enrich_profile};
use profilescout_scrape::FirecrawlCapability;
use profilescout_shared::{
    AppConfig, EnrichmentOptions, MAX_WEBSITES_CAP, Profile, cache_root, init_config,
    load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ProfileScout — enrich GitHub profiles with personal-website insights.
#[derive(Parser)]
#[command(
    name = "profilescout",
    version,
    about = "Enrich collected GitHub profile JSON with insights from personal websites.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enrich a collected profile JSON with website insights.
    Enrich {
        /// Path to the profile JSON, or '-' for stdin.
        input: String,

        /// Write the enriched profile here (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the insight cache and always scrape.
        #[arg(long)]
        no_cache: bool,

        /// Maximum websites to scrape for this run (1-3).
        #[arg(long)]
        max_websites: Option<usize>,

        /// Config file path (defaults to ~/.profilescout/profilescout.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default config file.
    InitConfig,

    /// Show the resolved configuration.
    ShowConfig {
        /// Config file path (defaults to ~/.profilescout/profilescout.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "profilescout=info",
        1 => "profilescout=debug",
        _ => "profilescout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Enrich {
            input,
            output,
            no_cache,
            max_websites,
            config,
        } => {
            cmd_enrich(
                &input,
                output.as_deref(),
                no_cache,
                max_websites,
                config.as_deref(),
            )
            .await
        }
        Command::InitConfig => cmd_init_config(),
        Command::ShowConfig { config } => cmd_show_config(config.as_deref()),
    }
}

async fn cmd_enrich(
    input: &str,
    output: Option<&Path>,
    no_cache: bool,
    max_websites: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if !config.enrichment.enabled {
        warn!("website enrichment is disabled in the config, profile will pass through unchanged");
    }

    let mut opts = EnrichmentOptions::from(&config);
    if no_cache {
        opts.use_cache = false;
    }
    if let Some(n) = max_websites {
        opts.max_websites = n.clamp(1, MAX_WEBSITES_CAP);
    }

    let profile = read_profile(input)?;
    info!(username = %profile.username, repos = profile.repos.len(), "loaded profile");

    let cache = InsightCache::new(cache_root(&config)?, opts.cache_ttl);

    let capability = FirecrawlCapability::from_config(&config)?;
    if capability.is_none() {
        warn!(
            env = %config.firecrawl.api_key_env,
            "scraping backend not configured, only cached insights will be used"
        );
    }

    let reporter = CliProgress::new();
    let enriched = enrich_profile(&profile, capability.as_ref(), &cache, &opts, &reporter).await;
    reporter.finish();

    let json = serde_json::to_string_pretty(&enriched)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| eyre!("cannot write '{}': {e}", path.display()))?;
            println!("Enriched profile written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Read a profile from a JSON file or stdin when the path is '-'.
fn read_profile(input: &str) -> Result<Profile> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| eyre!("cannot read stdin: {e}"))?;
        buffer
    } else {
        std::fs::read_to_string(input).map_err(|e| eyre!("cannot read '{input}': {e}"))?
    };

    serde_json::from_str(&text).map_err(|e| eyre!("invalid profile JSON: {e}"))
}

fn cmd_init_config() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_show_config(config_path: Option<&Path>) -> Result<()> {
    let config: AppConfig = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Progress reporter rendering the pipeline phases on an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl EnrichProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn site_started(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scraping [{current}/{total}] {url}"));
    }
}
