//! Candidate-URL discovery for profile enrichment.
//!
//! Scans a collected profile for personal-website URLs: the `blog` field,
//! URL-shaped text in the bio and repository descriptions, and synthesized
//! GitHub Pages addresses for repositories that have Pages enabled. Every
//! candidate passes through the validator before inclusion.

mod validator;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use profilescout_shared::{Profile, dedup_exact};

pub use validator::is_personal_website;

/// Permissive URL-shaped token pattern: absolute URLs, `www.` hosts, and
/// bare `domain.tld` tokens with an optional path.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"']+|www\.[^\s<>"']+|[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}(?:/[^\s<>"']*)?"#)
        .expect("URL regex")
});

/// Discover validated candidate website URLs from a profile.
///
/// Candidates are collected in a fixed order — blog field, bio text, then
/// each repository (description first, Pages URL second) — and deduplicated
/// by exact string equality, preserving first-seen order. Malformed or
/// non-personal URLs are silently dropped.
pub fn discover_urls(profile: &Profile) -> Vec<String> {
    let mut urls = Vec::new();

    if let Some(blog) = profile.blog.as_deref() {
        let blog = blog.trim();
        if !blog.is_empty() {
            if let Some(url) = normalize_candidate(blog) {
                if is_personal_website(&url) {
                    urls.push(url);
                }
            }
        }
    }

    if let Some(bio) = profile.bio.as_deref() {
        urls.extend(
            extract_urls_from_text(bio)
                .into_iter()
                .filter(|u| is_personal_website(u)),
        );
    }

    for repo in &profile.repos {
        if let Some(description) = repo.description.as_deref() {
            urls.extend(
                extract_urls_from_text(description)
                    .into_iter()
                    .filter(|u| is_personal_website(u)),
            );
        }

        if repo.has_pages && !repo.name.is_empty() {
            let pages_url = format!("https://{}.github.io/{}", profile.username, repo.name);
            if is_personal_website(&pages_url) {
                urls.push(pages_url);
            }
        }
    }

    let urls = dedup_exact(urls);
    debug!(count = urls.len(), "discovered candidate URLs");
    urls
}

/// Extract URL-shaped substrings from free text, normalized to absolute form.
///
/// Bare-domain and `www.` matches are prefixed with `https://`; tokens that
/// cannot be normalized are dropped.
pub fn extract_urls_from_text(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| normalize_candidate(m.as_str()))
        .collect()
}

/// Normalize a raw candidate to an absolute `http(s)` URL string.
fn normalize_candidate(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_end_matches(['.', ',', ';', ')']);
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else if raw.starts_with("www.") || raw.contains('.') {
        Some(format!("https://{raw}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilescout_shared::Repo;

    fn profile_with(bio: Option<&str>, blog: Option<&str>, repos: Vec<Repo>) -> Profile {
        Profile {
            username: "alice".into(),
            bio: bio.map(String::from),
            blog: blog.map(String::from),
            repos,
            ..Default::default()
        }
    }

    #[test]
    fn extracts_absolute_urls_from_text() {
        let urls = extract_urls_from_text("see https://alice.dev/projects for more");
        assert_eq!(urls, vec!["https://alice.dev/projects"]);
    }

    #[test]
    fn prefixes_www_and_bare_domains() {
        let urls = extract_urls_from_text("www.alice.dev and bob.me are mine");
        assert_eq!(urls, vec!["https://www.alice.dev", "https://bob.me"]);
    }

    #[test]
    fn strips_trailing_punctuation() {
        let urls = extract_urls_from_text("my site is alice.dev.");
        assert_eq!(urls, vec!["https://alice.dev"]);
    }

    #[test]
    fn blog_without_scheme_is_prefixed() {
        let profile = profile_with(None, Some("example.dev"), vec![]);
        assert_eq!(discover_urls(&profile), vec!["https://example.dev"]);
    }

    #[test]
    fn blank_blog_is_ignored() {
        let profile = profile_with(None, Some("   "), vec![]);
        assert!(discover_urls(&profile).is_empty());
    }

    #[test]
    fn denied_bio_links_yield_nothing() {
        let profile = profile_with(Some("reach me at linkedin.com/in/me"), None, vec![]);
        assert!(discover_urls(&profile).is_empty());
    }

    #[test]
    fn pages_repo_synthesizes_github_io_url() {
        let repo = Repo {
            name: "site".into(),
            has_pages: true,
            ..Default::default()
        };
        let profile = profile_with(None, None, vec![repo]);
        assert_eq!(discover_urls(&profile), vec!["https://alice.github.io/site"]);
    }

    #[test]
    fn repo_descriptions_are_scanned() {
        let repo = Repo {
            name: "demo".into(),
            description: Some("live at https://demo.netlify.app".into()),
            ..Default::default()
        };
        let profile = profile_with(None, None, vec![repo]);
        assert_eq!(discover_urls(&profile), vec!["https://demo.netlify.app"]);
    }

    #[test]
    fn discovery_is_idempotent_and_order_preserving() {
        let repo = Repo {
            name: "site".into(),
            description: Some("also at example.dev".into()),
            has_pages: true,
            ..Default::default()
        };
        let profile = profile_with(
            Some("portfolio: example.dev"),
            Some("example.dev"),
            vec![repo],
        );

        let first = discover_urls(&profile);
        let second = discover_urls(&profile);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec!["https://example.dev", "https://alice.github.io/site"]
        );
    }
}
