//! Enrichment pipeline: discovery, per-site scrape-or-cache, aggregation.

use tracing::{debug, info, instrument, warn};

use profilescout_cache::InsightCache;
use profilescout_discovery::discover_urls;
use profilescout_scrape::{ScrapeCapability, ScrapeOptions, scrape_website};
use profilescout_shared::{
    EnrichedProfile, EnrichmentOptions, MAX_WEBSITES_CAP, Profile, WebsiteEnrichment,
};

use crate::{aggregate, normalizer};

/// Progress callbacks for long-running enrichment phases.
///
/// The CLI renders these on a spinner; library callers use
/// [`SilentProgress`].
pub trait EnrichProgress: Send + Sync {
    fn phase(&self, name: &str);
    fn site_started(&self, url: &str, current: usize, total: usize);
}

/// No-op reporter for non-interactive callers.
pub struct SilentProgress;

impl EnrichProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn site_started(&self, _url: &str, _current: usize, _total: usize) {}
}

/// Run website enrichment over a collected profile.
///
/// Never fails: per-site problems are logged and skipped, and a profile
/// without candidate websites comes back unchanged (no enrichment block).
/// Without a capability only cached insights are usable; uncached sites are
/// skipped.
#[instrument(skip_all, fields(username = %profile.username))]
pub async fn enrich_profile<C: ScrapeCapability>(
    profile: &Profile,
    capability: Option<&C>,
    cache: &InsightCache,
    opts: &EnrichmentOptions,
    progress: &dyn EnrichProgress,
) -> EnrichedProfile {
    if !opts.enabled {
        info!("website enrichment disabled, passing profile through");
        return EnrichedProfile {
            profile: profile.clone(),
            website_enrichment: None,
        };
    }

    progress.phase("Discovering personal websites");
    let discovered_urls = discover_urls(profile);

    if discovered_urls.is_empty() {
        debug!("no personal websites discovered");
        return EnrichedProfile {
            profile: profile.clone(),
            website_enrichment: None,
        };
    }
    info!(candidates = discovered_urls.len(), "discovered personal websites");

    let max_websites = opts.max_websites.clamp(1, MAX_WEBSITES_CAP);
    let selected: Vec<&String> = discovered_urls.iter().take(max_websites).collect();
    let total = selected.len();

    let scrape_opts = ScrapeOptions {
        wait_for_ms: opts.wait_for_ms,
    };

    let mut insights = Vec::new();
    for (index, url) in selected.into_iter().enumerate() {
        progress.site_started(url, index + 1, total);

        if opts.use_cache {
            if let Some(cached) = cache.load(url) {
                debug!(%url, "using cached website insight");
                insights.push(cached);
                continue;
            }
        }

        let Some(capability) = capability else {
            warn!(%url, "no scraping capability configured, skipping site");
            continue;
        };

        match scrape_website(url, capability, &scrape_opts).await {
            Some(scrape) => {
                let insight = normalizer::normalize(&scrape, url);
                if opts.use_cache {
                    cache.store(url, &insight);
                }
                insights.push(insight);
            }
            None => warn!(%url, "site yielded no scrape result, skipping"),
        }
    }

    progress.phase("Aggregating website insights");
    let enrichment_summary = (!insights.is_empty()).then(|| aggregate::summarize(&insights));

    info!(
        discovered = discovered_urls.len(),
        crawled = insights.len(),
        "website enrichment complete"
    );

    EnrichedProfile {
        profile: profile.clone(),
        website_enrichment: Some(WebsiteEnrichment {
            discovered_urls,
            crawled_websites: insights,
            enrichment_summary,
        }),
    }
}
