//! Per-URL website insight cache.
//!
//! One JSON file per cached URL under a caller-supplied root, named by a
//! SHA-256 hash of the exact URL string. Entries carry their write
//! timestamp; anything older than the TTL, missing, or unparsable is a
//! miss. Caching is a performance optimization only — write failures are
//! swallowed and never fail a run. Entries are overwritten on re-scrape and
//! never deleted here (external cleanup only).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use profilescout_shared::WebsiteInsight;

/// On-disk envelope around a cached insight.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// When the entry was written; drives TTL validity.
    cached_at: DateTime<Utc>,
    insight: WebsiteInsight,
}

/// File-backed insight cache with a freshness window.
#[derive(Debug, Clone)]
pub struct InsightCache {
    root: PathBuf,
    ttl: Duration,
}

impl InsightCache {
    /// Create a cache rooted at `root` with the given freshness window.
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    /// Cache file path for a URL: `website_{sha256(url)}.json`.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let hash = format!("{:x}", hasher.finalize());
        self.root.join(format!("website_{hash}.json"))
    }

    /// Load a fresh cached insight for `url`, or `None` on any miss
    /// (absent, expired, or unreadable entry).
    pub fn load(&self, url: &str) -> Option<WebsiteInsight> {
        let path = self.path_for(url);
        let entry = read_entry(&path)?;

        let age = Utc::now().signed_duration_since(entry.cached_at);
        if age >= self.ttl {
            debug!(%url, age_hours = age.num_hours(), "cache entry expired");
            return None;
        }

        debug!(%url, "cache hit");
        Some(entry.insight)
    }

    /// Write an insight for `url`, overwriting any previous entry.
    /// I/O failures are logged and swallowed.
    pub fn store(&self, url: &str, insight: &WebsiteInsight) {
        let entry = CacheEntry {
            cached_at: Utc::now(),
            insight: insight.clone(),
        };

        if let Err(e) = std::fs::create_dir_all(&self.root) {
            debug!(root = ?self.root, error = %e, "cannot create cache directory");
            return;
        }

        let json = match serde_json::to_string_pretty(&entry) {
            Ok(json) => json,
            Err(e) => {
                debug!(%url, error = %e, "cannot serialize cache entry");
                return;
            }
        };

        let path = self.path_for(url);
        if let Err(e) = std::fs::write(&path, json) {
            debug!(?path, error = %e, "cache write failed");
        }
    }
}

/// Read and parse a cache entry; any failure is a miss.
fn read_entry(path: &Path) -> Option<CacheEntry> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(entry) => Some(entry),
        Err(e) => {
            debug!(?path, error = %e, "unparsable cache entry, treating as miss");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilescout_shared::{PersonalInfo, ProfessionalInfo, WebsiteType};

    fn insight(url: &str) -> WebsiteInsight {
        WebsiteInsight {
            url: url.into(),
            scraped_at: Utc::now(),
            personal_info: PersonalInfo::default(),
            professional: ProfessionalInfo {
                skills: vec!["Rust".into()],
                ..Default::default()
            },
            website_type: WebsiteType::General,
            technologies_mentioned: vec![],
            has_professional_content: true,
        }
    }

    /// Write an entry with a back-dated timestamp, bypassing `store`.
    fn write_aged(cache: &InsightCache, url: &str, age: Duration) {
        let entry = serde_json::json!({
            "cached_at": (Utc::now() - age).to_rfc3339(),
            "insight": serde_json::to_value(insight(url)).unwrap(),
        });
        std::fs::create_dir_all(&cache.root).unwrap();
        std::fs::write(cache.path_for(url), entry.to_string()).unwrap();
    }

    #[test]
    fn store_then_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));

        let url = "https://alice.dev";
        cache.store(url, &insight(url));

        let loaded = cache.load(url).expect("cache hit");
        assert_eq!(loaded.url, url);
        assert_eq!(loaded.professional.skills, vec!["Rust"]);
    }

    #[test]
    fn missing_entry_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));
        assert!(cache.load("https://nobody.dev").is_none());
    }

    #[test]
    fn expired_entry_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));

        write_aged(&cache, "https://alice.dev", Duration::hours(25));
        assert!(cache.load("https://alice.dev").is_none());
    }

    #[test]
    fn entry_just_inside_ttl_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));

        write_aged(
            &cache,
            "https://alice.dev",
            Duration::hours(24) - Duration::seconds(1),
        );
        assert!(cache.load("https://alice.dev").is_some());
    }

    #[test]
    fn corrupt_entry_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));

        std::fs::create_dir_all(tmp.path()).unwrap();
        std::fs::write(cache.path_for("https://alice.dev"), "{ not json").unwrap();
        assert!(cache.load("https://alice.dev").is_none());
    }

    #[test]
    fn store_overwrites_previous_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = InsightCache::new(tmp.path(), Duration::hours(24));

        let url = "https://alice.dev";
        cache.store(url, &insight(url));

        let mut updated = insight(url);
        updated.professional.skills = vec!["Go".into()];
        cache.store(url, &updated);

        assert_eq!(cache.load(url).unwrap().professional.skills, vec!["Go"]);
    }

    #[test]
    fn distinct_urls_get_distinct_paths() {
        let cache = InsightCache::new("/tmp/ps-cache", Duration::hours(24));
        assert_ne!(
            cache.path_for("https://alice.dev"),
            cache.path_for("https://alice.dev/")
        );
    }

    #[test]
    fn write_failure_is_swallowed() {
        // Root under a path that cannot be created.
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        let cache = InsightCache::new(file.join("sub"), Duration::hours(24));
        cache.store("https://alice.dev", &insight("https://alice.dev"));
        assert!(cache.load("https://alice.dev").is_none());
    }
}
