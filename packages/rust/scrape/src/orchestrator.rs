//! Multi-pass scrape orchestration for one website.
//!
//! A site is scraped in up to three sequential passes against the same URL:
//! a general profile pass (rendered text + broad structured extraction), a
//! technology-focused pass, and a client/portfolio pass. Later passes are
//! unioned into the general pass's fields. Only failure of the first pass
//! aborts the site; later failures keep whatever was already gathered.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument, warn};

use profilescout_shared::union_into;

use crate::capability::{ExtractionSpec, ScrapeCapability, ScrapeFormat, ScrapeRequest};

// ---------------------------------------------------------------------------
// Structured extraction shapes
// ---------------------------------------------------------------------------

/// Typed view of the general pass's structured extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredExtract {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub clients: Vec<String>,
    #[serde(default)]
    pub contact: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub social: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Typed view of the technology pass's extraction.
#[derive(Debug, Clone, Default, Deserialize)]
struct TechExtract {
    #[serde(default)]
    all_technologies: Vec<String>,
    #[serde(default)]
    tech_stack_items: Vec<String>,
    #[serde(default)]
    all_skills: Vec<String>,
}

/// Typed view of the client pass's extraction.
#[derive(Debug, Clone, Default, Deserialize)]
struct ClientExtract {
    #[serde(default)]
    client_companies: Vec<String>,
}

/// Merged outcome of all passes for one site.
#[derive(Debug, Clone, Default)]
pub struct SiteScrape {
    /// Rendered page content from the general pass.
    pub markdown: String,
    /// Merged structured extraction, when the backend produced one.
    pub extract: Option<StructuredExtract>,
}

/// Per-site scrape options.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Render-settle delay requested per pass, in ms.
    pub wait_for_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self { wait_for_ms: 5000 }
    }
}

// ---------------------------------------------------------------------------
// Extraction prompts & schemas
// ---------------------------------------------------------------------------

const GENERAL_PROMPT: &str = "Extract comprehensive personal and professional information \
including: name, title/role, ALL skills (both technical and soft), experience, education, \
projects, services, clients, contact information, about/bio sections, and any other relevant \
career details. Look specifically for 'Tech Stack', 'Technology Stack', 'Technologies Used', \
'Built With', or similar sections that list technologies. IMPORTANT: Only extract information \
that is actually present on the website. Do not generate placeholder content, make \
assumptions, or invent any information. If a field cannot be found, leave it empty rather \
than creating fictional content.";

const TECH_PROMPT: &str = "Extract ALL technologies, programming languages, frameworks, \
tools, libraries, platforms, and technical skills mentioned anywhere on this website. Look \
specifically for 'Tech Stack', 'Technology Stack', 'Technologies Used', 'Built With', \
'Stack', 'Tools & Technologies', or similar sections. Also extract soft skills, \
methodologies, and professional competencies. IMPORTANT: Only extract technologies and \
skills that are explicitly mentioned on the website. If none are found, leave the lists \
empty rather than creating fictional entries.";

const CLIENT_PROMPT: &str = "Look specifically for a 'Clients' section, portfolio section, \
or any area showing past work relationships on this website. Extract all company names, \
brand names, or organization names mentioned, including names from logos, image titles, or \
alt text. IMPORTANT: Only extract names that are explicitly shown on the website. If no \
clients or companies are found, leave the list empty rather than creating fictional entries.";

fn string_array(description: &str) -> serde_json::Value {
    json!({
        "type": "array",
        "items": {"type": "string"},
        "description": description
    })
}

/// Extraction spec for the general profile pass.
fn general_extraction() -> ExtractionSpec {
    ExtractionSpec {
        prompt: GENERAL_PROMPT.into(),
        schema: json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Person's full name"},
                "title": {"type": "string", "description": "Professional title or role"},
                "bio": {"type": "string", "description": "About/bio section content"},
                "skills": string_array("All technical and soft skills found on the website"),
                "technologies": string_array(
                    "Programming languages, frameworks, tools, libraries, and platforms"
                ),
                "tech_stack": string_array(
                    "Technologies listed in 'Tech Stack'/'Built With'-style sections"
                ),
                "experience": string_array("Work experience and professional history"),
                "education": string_array("Educational background"),
                "projects": string_array("Notable projects or work"),
                "services": string_array("Services offered or areas of expertise"),
                "clients": string_array("Past clients or companies worked with"),
                "contact": {"type": "object", "description": "Contact information"},
                "social": {"type": "object", "description": "Social media links"},
                "achievements": string_array("Awards, certifications, notable achievements"),
            }
        }),
    }
}

/// Extraction spec for the technology-focused pass.
fn tech_extraction() -> ExtractionSpec {
    ExtractionSpec {
        prompt: TECH_PROMPT.into(),
        schema: json!({
            "type": "object",
            "properties": {
                "all_technologies": string_array(
                    "Every technology, language, framework, tool, or platform on the site"
                ),
                "tech_stack_items": string_array(
                    "Technologies found in dedicated 'Tech Stack'-style sections"
                ),
                "all_skills": string_array(
                    "All skills, including soft skills and methodologies"
                ),
            }
        }),
    }
}

/// Extraction spec for the client/portfolio pass.
fn client_extraction() -> ExtractionSpec {
    ExtractionSpec {
        prompt: CLIENT_PROMPT.into(),
        schema: json!({
            "type": "object",
            "properties": {
                "client_companies": string_array(
                    "Names of client companies, organizations, or brands on the site"
                ),
            }
        }),
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Scrape one validated URL through the injected capability.
///
/// Returns `None` when the general pass produces nothing — the site is then
/// skipped entirely. Technology- and client-pass failures are logged and the
/// already-gathered data is kept.
#[instrument(skip_all, fields(url = %url))]
pub async fn scrape_website<C: ScrapeCapability>(
    url: &str,
    capability: &C,
    opts: &ScrapeOptions,
) -> Option<SiteScrape> {
    // Pass 1: general profile extraction with rendered text.
    let general = ScrapeRequest {
        url: url.to_string(),
        formats: vec![ScrapeFormat::Markdown, ScrapeFormat::Extract],
        only_main_content: true,
        wait_for_ms: opts.wait_for_ms,
        extraction: Some(general_extraction()),
    };

    let raw = match capability.scrape(&general).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("general pass produced no content, skipping site");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "general pass failed, skipping site");
            return None;
        }
    };

    let markdown = raw.markdown.unwrap_or_default();
    let mut extract = raw.extract.and_then(parse_extract::<StructuredExtract>);

    // Fold the general pass's tech_stack into its technologies.
    if let Some(ex) = extract.as_mut() {
        let stack = ex.tech_stack.clone();
        union_into(&mut ex.technologies, stack);
    }

    // Pass 2: exhaustive technology/skill extraction.
    let tech_request = ScrapeRequest {
        url: url.to_string(),
        formats: vec![ScrapeFormat::Extract],
        only_main_content: true,
        wait_for_ms: opts.wait_for_ms,
        extraction: Some(tech_extraction()),
    };

    let tech_succeeded = match capability.scrape(&tech_request).await {
        Ok(Some(raw)) => {
            if let (Some(ex), Some(tech)) =
                (extract.as_mut(), raw.extract.and_then(parse_extract::<TechExtract>))
            {
                union_into(&mut ex.technologies, tech.all_technologies);
                union_into(&mut ex.technologies, tech.tech_stack_items.clone());
                union_into(&mut ex.tech_stack, tech.tech_stack_items);
                union_into(&mut ex.skills, tech.all_skills);
            }
            true
        }
        Ok(None) => {
            debug!("technology pass produced no content");
            false
        }
        Err(e) => {
            warn!(error = %e, "technology pass failed, keeping general pass data");
            false
        }
    };

    // Pass 3: client/portfolio extraction, only after a successful pass 2.
    if tech_succeeded {
        let client_request = ScrapeRequest {
            url: url.to_string(),
            formats: vec![ScrapeFormat::Extract],
            only_main_content: true,
            wait_for_ms: opts.wait_for_ms,
            extraction: Some(client_extraction()),
        };

        match capability.scrape(&client_request).await {
            Ok(Some(raw)) => {
                if let (Some(ex), Some(clients)) =
                    (extract.as_mut(), raw.extract.and_then(parse_extract::<ClientExtract>))
                {
                    union_into(&mut ex.clients, clients.client_companies);
                }
            }
            Ok(None) => debug!("client pass produced no content"),
            Err(e) => warn!(error = %e, "client pass failed, keeping gathered data"),
        }
    }

    Some(SiteScrape { markdown, extract })
}

/// Deserialize a structured-extraction value, tolerating shape mismatches.
fn parse_extract<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(error = %e, "unparsable structured extract");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::RawScrapeResult;
    use profilescout_shared::Result;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Capability double that replays scripted responses and records requests.
    struct ScriptedCapability {
        responses: Mutex<VecDeque<Result<Option<RawScrapeResult>>>>,
        requests: Mutex<Vec<ScrapeRequest>>,
    }

    impl ScriptedCapability {
        fn new(responses: Vec<Result<Option<RawScrapeResult>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ScrapeRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ScrapeCapability for ScriptedCapability {
        async fn scrape(&self, request: &ScrapeRequest) -> Result<Option<RawScrapeResult>> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(None))
        }
    }

    fn raw(markdown: Option<&str>, extract: serde_json::Value) -> Option<RawScrapeResult> {
        Some(RawScrapeResult {
            markdown: markdown.map(String::from),
            extract: Some(extract),
        })
    }

    #[tokio::test]
    async fn three_passes_issued_in_order() {
        let capability = ScriptedCapability::new(vec![
            Ok(raw(Some("# Alice"), serde_json::json!({"skills": ["Rust"]}))),
            Ok(raw(None, serde_json::json!({"all_technologies": ["Tokio"]}))),
            Ok(raw(None, serde_json::json!({"client_companies": ["Acme"]}))),
        ]);

        let scrape = scrape_website("https://alice.dev", &capability, &ScrapeOptions::default())
            .await
            .expect("merged scrape");

        let requests = capability.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0].formats,
            vec![ScrapeFormat::Markdown, ScrapeFormat::Extract]
        );
        assert_eq!(requests[1].formats, vec![ScrapeFormat::Extract]);
        assert_eq!(requests[2].formats, vec![ScrapeFormat::Extract]);
        assert!(requests.iter().all(|r| r.url == "https://alice.dev"));
        assert!(requests.iter().all(|r| r.extraction.is_some()));

        assert_eq!(scrape.markdown, "# Alice");
        let extract = scrape.extract.unwrap();
        assert_eq!(extract.skills, vec!["Rust"]);
        assert_eq!(extract.technologies, vec!["Tokio"]);
        assert_eq!(extract.clients, vec!["Acme"]);
    }

    #[tokio::test]
    async fn prompts_forbid_fabrication() {
        let capability = ScriptedCapability::new(vec![
            Ok(raw(Some(""), serde_json::json!({}))),
            Ok(None),
        ]);

        let _ = scrape_website("https://alice.dev", &capability, &ScrapeOptions::default()).await;

        for request in capability.requests() {
            let prompt = &request.extraction.unwrap().prompt;
            assert!(prompt.contains("leave"), "prompt must ask for empty fields");
        }
    }

    #[tokio::test]
    async fn general_pass_failure_aborts_site() {
        let capability = ScriptedCapability::new(vec![Ok(None)]);

        let scrape =
            scrape_website("https://alice.dev", &capability, &ScrapeOptions::default()).await;

        assert!(scrape.is_none());
        assert_eq!(capability.requests().len(), 1);
    }

    #[tokio::test]
    async fn tech_pass_failure_keeps_general_data_and_skips_client_pass() {
        let capability = ScriptedCapability::new(vec![
            Ok(raw(
                Some("# Alice"),
                serde_json::json!({"skills": ["Rust"], "technologies": ["Axum"]}),
            )),
            Err(profilescout_shared::ProfileScoutError::Network("boom".into())),
        ]);

        let scrape = scrape_website("https://alice.dev", &capability, &ScrapeOptions::default())
            .await
            .expect("merged scrape");

        assert_eq!(capability.requests().len(), 2);
        let extract = scrape.extract.unwrap();
        assert_eq!(extract.skills, vec!["Rust"]);
        assert_eq!(extract.technologies, vec!["Axum"]);
        assert!(extract.clients.is_empty());
    }

    #[tokio::test]
    async fn technology_union_deduplicates() {
        let capability = ScriptedCapability::new(vec![
            Ok(raw(
                Some(""),
                serde_json::json!({
                    "technologies": ["React", "Docker"],
                    "tech_stack": ["react"]
                }),
            )),
            Ok(raw(
                None,
                serde_json::json!({
                    "all_technologies": ["docker", "Kubernetes"],
                    "tech_stack_items": ["Kubernetes", "Terraform"],
                    "all_skills": ["CI/CD"]
                }),
            )),
            Ok(None),
        ]);

        let scrape = scrape_website("https://alice.dev", &capability, &ScrapeOptions::default())
            .await
            .expect("merged scrape");

        let extract = scrape.extract.unwrap();
        assert_eq!(
            extract.technologies,
            vec!["React", "Docker", "Kubernetes", "Terraform"]
        );
        assert_eq!(extract.tech_stack, vec!["react", "Kubernetes", "Terraform"]);
        assert_eq!(extract.skills, vec!["CI/CD"]);
    }

    #[tokio::test]
    async fn unparsable_extract_keeps_markdown() {
        let capability = ScriptedCapability::new(vec![
            Ok(Some(RawScrapeResult {
                markdown: Some("# Alice".into()),
                extract: Some(serde_json::json!("not an object")),
            })),
            Ok(None),
        ]);

        let scrape = scrape_website("https://alice.dev", &capability, &ScrapeOptions::default())
            .await
            .expect("merged scrape");

        assert_eq!(scrape.markdown, "# Alice");
        assert!(scrape.extract.is_none());
    }
}
