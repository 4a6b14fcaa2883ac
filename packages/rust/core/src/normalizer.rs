//! Raw-scrape normalization into the canonical per-site insight.
//!
//! The structured extraction maps directly onto `personal_info` and
//! `professional`; the rendered text is independently scanned against a
//! fixed technology vocabulary, with extra weight given to lines following
//! "tech stack"-style headers. Both views are unioned into
//! `technologies_mentioned`, so a site whose extraction came back thin
//! still surfaces the technologies its text plainly mentions.

use chrono::Utc;
use tracing::debug;

use profilescout_scrape::SiteScrape;
use profilescout_shared::{
    PersonalInfo, ProfessionalInfo, WebsiteInsight, WebsiteType, union_into,
};

/// Technology vocabulary matched case-insensitively against rendered text.
const TECH_KEYWORDS: &[&str] = &[
    "python", "javascript", "typescript", "react", "vue", "angular", "node", "java", "kotlin",
    "swift", "golang", "rust", "c++", "c#", "docker", "kubernetes", "aws", "azure", "gcp",
    "terraform", "mongodb", "postgresql", "mysql", "redis", "machine learning", "ai",
    "data science", "blockchain", "css", "html", "scss", "sass", "bootstrap", "material",
    "figma", "sketch", "photoshop", "git", "github", "firebase", "ionic", "stencil", "jquery",
    "ajax", "json", "sql", "jest", "storybook", "webpack", "npm", "yarn", "babel", "eslint",
    "next.js", "nextjs", "express", "expressjs", "tailwind", "tailwindcss", "websockets",
    "socket.io", "socketio", "solana", "graphql", "apollo", "redux", "mobx", "gatsby", "nuxt",
    "svelte", "laravel", "django", "flask", "spring", "dotnet", ".net", "unity", "unreal",
    "tensorflow", "pytorch", "keras", "pandas", "numpy", "material ui", "ant design",
    "chakra ui", "styled components", "emotion",
];

/// Section headers whose following lines are scanned with higher confidence.
const TECH_HEADER_PATTERNS: &[&str] = &[
    "tech stack:",
    "technology stack:",
    "technologies used:",
    "built with:",
    "stack:",
    "tools & technologies:",
    "tools and technologies:",
    "technologies:",
    "framework:",
    "frameworks:",
    "programming languages:",
    "languages:",
];

/// Keyword groups deciding `website_type`; first matching group wins.
const PORTFOLIO_KEYWORDS: &[&str] = &["portfolio", "resume", "cv", "about me"];
const BLOG_KEYWORDS: &[&str] = &["blog", "articles", "posts"];
const SERVICES_KEYWORDS: &[&str] = &["freelance", "services", "hire", "consulting"];

/// Convert one merged scrape into the canonical per-site insight.
///
/// Not called for failed scrapes — an empty scrape means "no insight", not
/// an empty one.
pub fn normalize(scrape: &SiteScrape, url: &str) -> WebsiteInsight {
    let content = scrape.markdown.to_lowercase();

    let (personal_info, professional) = match &scrape.extract {
        Some(extract) => (
            PersonalInfo {
                name: extract.name.clone().filter(|s| !s.is_empty()),
                title: extract.title.clone().filter(|s| !s.is_empty()),
                bio: extract.bio.clone().filter(|s| !s.is_empty()),
                contact: extract.contact.clone(),
                social: extract.social.clone(),
            },
            ProfessionalInfo {
                skills: extract.skills.clone(),
                technologies: extract.technologies.clone(),
                tech_stack: extract.tech_stack.clone(),
                experience: extract.experience.clone(),
                education: extract.education.clone(),
                projects: extract.projects.clone(),
                services: extract.services.clone(),
                clients: extract.clients.clone(),
                achievements: extract.achievements.clone(),
            },
        ),
        None => Default::default(),
    };

    let mut technologies_mentioned = Vec::new();
    union_into(
        &mut technologies_mentioned,
        professional.technologies.iter().cloned(),
    );
    union_into(&mut technologies_mentioned, scan_keywords(&content));
    union_into(&mut technologies_mentioned, scan_tech_headers(&content));

    let website_type = classify_website_type(&content);

    let has_professional_content = !professional.skills.is_empty()
        || !professional.technologies.is_empty()
        || !professional.experience.is_empty()
        || !professional.projects.is_empty()
        || !professional.services.is_empty()
        || !professional.clients.is_empty();

    debug!(
        %url,
        ?website_type,
        technologies = technologies_mentioned.len(),
        has_professional_content,
        "normalized website insight"
    );

    WebsiteInsight {
        url: url.to_string(),
        scraped_at: Utc::now(),
        personal_info,
        professional,
        website_type,
        technologies_mentioned,
        has_professional_content,
    }
}

/// Scan lowercased content for the technology vocabulary.
fn scan_keywords(content: &str) -> Vec<String> {
    TECH_KEYWORDS
        .iter()
        .filter(|keyword| content.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Scan the two lines following each "tech stack"-style header.
fn scan_tech_headers(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut found = Vec::new();

    for pattern in TECH_HEADER_PATTERNS {
        let Some(index) = lines.iter().position(|line| line.contains(pattern)) else {
            continue;
        };

        let window_end = (index + 3).min(lines.len());
        let window = lines[index..window_end].join(" ");

        union_into(
            &mut found,
            TECH_KEYWORDS
                .iter()
                .filter(|keyword| window.contains(*keyword))
                .map(|keyword| keyword.to_string()),
        );
    }

    found
}

/// Classify a site by the first matching keyword group.
fn classify_website_type(content: &str) -> WebsiteType {
    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| content.contains(k));

    if matches_any(PORTFOLIO_KEYWORDS) {
        WebsiteType::PersonalPortfolio
    } else if matches_any(BLOG_KEYWORDS) {
        WebsiteType::Blog
    } else if matches_any(SERVICES_KEYWORDS) {
        WebsiteType::ProfessionalServices
    } else {
        WebsiteType::General
    }
}
