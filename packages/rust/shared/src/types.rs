//! Core domain types for the website enrichment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Profile (input boundary)
// ---------------------------------------------------------------------------

/// A collected GitHub profile, produced by the profile-collection collaborator.
///
/// The pipeline only models the fields it reads; everything else the
/// collector put on the record is carried through untouched in `extra`, so
/// an enriched profile serializes back with all original fields intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// GitHub login.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// The profile's website field (may lack a scheme).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    /// Public repositories, in collector order.
    #[serde(default)]
    pub repos: Vec<Repo>,
    /// Collector fields the pipeline does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A repository record within a [`Profile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repo {
    /// Repository name.
    pub name: String,
    /// Repository description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether GitHub Pages is enabled for this repository.
    #[serde(default)]
    pub has_pages: bool,
    /// Collector fields the pipeline does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// WebsiteInsight (per-site canonical record)
// ---------------------------------------------------------------------------

/// Site classification derived from rendered page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteType {
    PersonalPortfolio,
    Blog,
    ProfessionalServices,
    General,
}

/// Identity and contact details extracted from one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Contact channels (email, phone, ...), keyed by channel name.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub contact: serde_json::Map<String, serde_json::Value>,
    /// Social links keyed by platform.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub social: serde_json::Map<String, serde_json::Value>,
}

/// Career-related lists extracted from one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    /// Technologies found specifically in "Tech Stack"-style sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
}

/// The canonical per-site record: one normalized scrape of one URL.
///
/// Immutable once produced; created at most once per URL per enrichment run
/// (or loaded from cache).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteInsight {
    /// The scraped URL.
    pub url: String,
    /// When the scrape was processed.
    pub scraped_at: DateTime<Utc>,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub professional: ProfessionalInfo,
    pub website_type: WebsiteType,
    /// Technologies seen anywhere: structured extraction, keyword scan,
    /// and tech-stack header sections, deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies_mentioned: Vec<String>,
    pub has_professional_content: bool,
}

// ---------------------------------------------------------------------------
// EnrichmentSummary (cross-site aggregate)
// ---------------------------------------------------------------------------

/// Deduplicated/concatenated insight data merged across all sites in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedInsights {
    /// Deduplicated union of per-site skill lists.
    #[serde(default)]
    pub additional_skills: Vec<String>,
    /// Deduplicated union of per-site technology lists.
    #[serde(default)]
    pub additional_technologies: Vec<String>,
    /// Concatenated experience entries (duplicates permitted).
    #[serde(default)]
    pub additional_experience: Vec<String>,
    /// Concatenated project entries (duplicates permitted).
    #[serde(default)]
    pub additional_projects: Vec<String>,
    /// Concatenated service entries (duplicates permitted).
    #[serde(default)]
    pub professional_services: Vec<String>,
    /// Concatenated client names (duplicates permitted).
    #[serde(default)]
    pub clients: Vec<String>,
    /// Deduplicated site classifications observed.
    #[serde(default)]
    pub website_types: Vec<WebsiteType>,
    /// Deduplicated union of content-level technology mentions.
    #[serde(default)]
    pub technologies_mentioned: Vec<String>,
    /// Contact map merged site-by-site; later sites overwrite on collision.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub contact_info: serde_json::Map<String, serde_json::Value>,
    /// Bio text collected from each site, in site order.
    #[serde(default)]
    pub bio_snippets: Vec<String>,
}

/// Aggregate across all processed sites for one enrichment run.
///
/// Derived data — recomputed every run, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    /// Number of insights aggregated.
    pub websites_crawled: usize,
    pub combined_insights: CombinedInsights,
}

// ---------------------------------------------------------------------------
// EnrichedProfile (output boundary)
// ---------------------------------------------------------------------------

/// The enrichment block attached to a profile under `website_enrichment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebsiteEnrichment {
    /// Every validated candidate URL, in discovery order.
    #[serde(default)]
    pub discovered_urls: Vec<String>,
    /// Insights actually produced (failed/skipped sites are omitted).
    #[serde(default)]
    pub crawled_websites: Vec<WebsiteInsight>,
    /// Cross-site aggregate; absent when no site produced an insight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment_summary: Option<EnrichmentSummary>,
}

/// A [`Profile`] plus the optional enrichment block.
///
/// Serializes identically to the input profile when no block is attached,
/// so downstream renderers can treat both shapes uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedProfile {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_enrichment: Option<WebsiteEnrichment>,
}

// ---------------------------------------------------------------------------
// Ordered-set helpers
// ---------------------------------------------------------------------------

/// Append `src` items into `dst`, skipping duplicates case-insensitively
/// and preserving first-seen order and first-seen casing.
pub fn union_into(dst: &mut Vec<String>, src: impl IntoIterator<Item = String>) {
    let mut seen: std::collections::HashSet<String> =
        dst.iter().map(|s| s.to_lowercase()).collect();
    for item in src {
        let item = item.trim().to_string();
        if item.is_empty() {
            continue;
        }
        if seen.insert(item.to_lowercase()) {
            dst.push(item);
        }
    }
}

/// Deduplicate by exact string equality, preserving first-seen order.
pub fn dedup_exact(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
