//! Cross-site aggregation of per-website insights.

use profilescout_shared::{CombinedInsights, EnrichmentSummary, WebsiteInsight, union_into};

/// Fold per-site insights into one combined summary.
///
/// Set-like fields (skills, technologies, mentions, website types) are
/// deduplicated in first-seen order; narrative fields (experience, projects,
/// services, clients, bio snippets) are concatenated in site order; contact
/// entries merge with later sites overwriting earlier keys.
pub fn summarize(insights: &[WebsiteInsight]) -> EnrichmentSummary {
    let mut combined = CombinedInsights::default();

    for insight in insights {
        if !combined.website_types.contains(&insight.website_type) {
            combined.website_types.push(insight.website_type);
        }

        union_into(
            &mut combined.additional_skills,
            insight.professional.skills.iter().cloned(),
        );
        union_into(
            &mut combined.additional_technologies,
            insight.professional.technologies.iter().cloned(),
        );
        union_into(
            &mut combined.technologies_mentioned,
            insight.technologies_mentioned.iter().cloned(),
        );

        combined
            .additional_experience
            .extend(insight.professional.experience.iter().cloned());
        combined
            .additional_projects
            .extend(insight.professional.projects.iter().cloned());
        combined
            .professional_services
            .extend(insight.professional.services.iter().cloned());
        combined
            .clients
            .extend(insight.professional.clients.iter().cloned());

        if let Some(bio) = &insight.personal_info.bio {
            if !bio.trim().is_empty() {
                combined.bio_snippets.push(bio.clone());
            }
        }

        for (key, value) in &insight.personal_info.contact {
            combined.contact_info.insert(key.clone(), value.clone());
        }
    }

    EnrichmentSummary {
        websites_crawled: insights.len(),
        combined_insights: combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use profilescout_shared::{PersonalInfo, ProfessionalInfo, WebsiteType};

    fn insight(url: &str) -> WebsiteInsight {
        WebsiteInsight {
            url: url.into(),
            scraped_at: Utc::now(),
            personal_info: PersonalInfo::default(),
            professional: ProfessionalInfo::default(),
            website_type: WebsiteType::General,
            technologies_mentioned: Vec::new(),
            has_professional_content: false,
        }
    }

    #[test]
    fn counts_crawled_websites() {
        let summary = summarize(&[insight("https://a.dev"), insight("https://b.dev")]);
        assert_eq!(summary.websites_crawled, 2);
    }

    #[test]
    fn skills_union_case_insensitively_across_sites() {
        let mut a = insight("https://a.dev");
        a.professional.skills = vec!["Rust".into(), "Python".into()];
        let mut b = insight("https://b.dev");
        b.professional.skills = vec!["rust".into(), "Go".into()];

        let summary = summarize(&[a, b]);
        assert_eq!(
            summary.combined_insights.additional_skills,
            vec!["Rust", "Python", "Go"]
        );
    }

    #[test]
    fn experience_and_clients_concatenate() {
        let mut a = insight("https://a.dev");
        a.professional.experience = vec!["Acme 2020".into()];
        a.professional.clients = vec!["Acme".into()];
        let mut b = insight("https://b.dev");
        b.professional.experience = vec!["Acme 2020".into()];
        b.professional.clients = vec!["Acme".into()];

        let summary = summarize(&[a, b]);
        // duplicates survive, these fields are narrative not sets
        assert_eq!(summary.combined_insights.additional_experience.len(), 2);
        assert_eq!(summary.combined_insights.clients.len(), 2);
    }

    #[test]
    fn website_types_deduplicate_in_order() {
        let mut a = insight("https://a.dev");
        a.website_type = WebsiteType::Blog;
        let mut b = insight("https://b.dev");
        b.website_type = WebsiteType::PersonalPortfolio;
        let mut c = insight("https://c.dev");
        c.website_type = WebsiteType::Blog;

        let summary = summarize(&[a, b, c]);
        assert_eq!(
            summary.combined_insights.website_types,
            vec![WebsiteType::Blog, WebsiteType::PersonalPortfolio]
        );
    }

    #[test]
    fn later_site_contact_overwrites_earlier() {
        let mut a = insight("https://a.dev");
        a.personal_info
            .contact
            .insert("email".into(), serde_json::json!("old@a.dev"));
        let mut b = insight("https://b.dev");
        b.personal_info
            .contact
            .insert("email".into(), serde_json::json!("new@b.dev"));

        let summary = summarize(&[a, b]);
        assert_eq!(
            summary.combined_insights.contact_info["email"],
            serde_json::json!("new@b.dev")
        );
    }

    #[test]
    fn blank_bios_are_not_collected() {
        let mut a = insight("https://a.dev");
        a.personal_info.bio = Some("  ".into());
        let mut b = insight("https://b.dev");
        b.personal_info.bio = Some("Builds compilers.".into());

        let summary = summarize(&[a, b]);
        assert_eq!(
            summary.combined_insights.bio_snippets,
            vec!["Builds compilers."]
        );
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.websites_crawled, 0);
        assert!(summary.combined_insights.additional_skills.is_empty());
        assert!(summary.combined_insights.website_types.is_empty());
    }
}
