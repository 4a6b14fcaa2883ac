//! Personal-website validator.
//!
//! Decides whether a candidate URL is worth scraping: social networks,
//! code forges, and platform domains are filtered out; personal-hosting
//! patterns and conventional personal TLDs are accepted.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Domains that are never personal websites (matched exactly or as a
/// parent of the candidate's host).
const DENIED_DOMAINS: &[&str] = &[
    // Code forges
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    // Social networks
    "linkedin.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    // Q&A and blogging platforms
    "stackoverflow.com",
    "stackexchange.com",
    "medium.com",
    "dev.to",
    "hashnode.com",
    // Chat platforms
    "discord.gg",
    "discord.com",
    "slack.com",
    // Major cloud / registry domains
    "google.com",
    "amazon.com",
    "microsoft.com",
    "apple.com",
    "npmjs.com",
    "pypi.org",
];

/// Suffixes conventionally used for personal/professional sites.
const ACCEPTED_TLDS: &[&str] = &[
    ".com", ".org", ".net", ".io", ".dev", ".me", ".personal", ".tech", ".co",
];

/// Hosts on known personal-hosting platforms (`alice.github.io`, ...).
static PERSONAL_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9.-]+\.(github\.io|netlify\.app|vercel\.app|herokuapp\.com)$")
        .expect("personal host regex")
});

/// Check whether a URL looks like a personal website worth scraping.
///
/// Unparsable URLs are rejected; rejection is a normal filtering outcome,
/// not an error.
pub fn is_personal_website(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();

    for denied in DENIED_DOMAINS {
        if host == *denied || host.ends_with(&format!(".{denied}")) {
            return false;
        }
    }

    if PERSONAL_HOST_RE.is_match(&host) {
        return true;
    }

    ACCEPTED_TLDS.iter().any(|tld| host.ends_with(tld))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_denied_domains() {
        assert!(!is_personal_website("https://github.com/alice"));
        assert!(!is_personal_website("https://linkedin.com/in/alice"));
        assert!(!is_personal_website("https://medium.com/@alice"));
        assert!(!is_personal_website("https://www.npmjs.com/package/x"));
    }

    #[test]
    fn rejects_subdomains_of_denied_domains() {
        assert!(!is_personal_website("https://sub.github.com/x"));
        assert!(!is_personal_website("https://gist.github.com/alice"));
        assert!(!is_personal_website("https://de.linkedin.com/in/alice"));
    }

    #[test]
    fn accepts_personal_hosting_platforms() {
        assert!(is_personal_website("https://alice.github.io"));
        assert!(is_personal_website("https://alice.github.io/site"));
        assert!(is_personal_website("https://my-site.netlify.app"));
        assert!(is_personal_website("https://portfolio.vercel.app"));
        assert!(is_personal_website("https://app-name.herokuapp.com"));
    }

    #[test]
    fn accepts_conventional_personal_tlds() {
        assert!(is_personal_website("https://alice.dev"));
        assert!(is_personal_website("https://alice.me/about"));
        assert!(is_personal_website("https://example.com"));
        assert!(is_personal_website("https://studio.tech"));
    }

    #[test]
    fn rejects_malformed_and_unknown() {
        assert!(!is_personal_website("not a url"));
        assert!(!is_personal_website("example.dev"));
        assert!(!is_personal_website("https://example.invalidtld"));
    }
}
