use crate::types::{Experience, Profile};

const SKILLS: &[&str] = &[
    "AI agent architecture",
    "Prompt engineering",
    "Multi-agent workflows",
    "LLM evaluation and testing",
    "Voice AI",
    "API integrations",
    "Enterprise sales",
    "MEDDICC",
    "SANDLER",
    "BANT",
    "Challenger Sale",
    "Solution engineering",
    "ICP development",
    "Pricing and packaging",
    "Sales playbook creation",
    "0 to 1 vertical building",
];

const INTERESTS: &[&str] = &["Sauna", "Hiking", "Pilates", "Running", "Podcasts"];

const COMPANIES: &[&str] = &["Lindy", "Teamflow", "Cintas"];

/// The fixed profile every scraped profile is compared against.
///
/// Built once at startup and shared read-only.
pub fn reference_profile() -> Profile {
    Profile {
        name: "Lindy".to_string(),
        headline: "AI/SaaS".to_string(),
        location: "San Francisco".to_string(),
        skills: SKILLS.iter().map(|s| s.to_string()).collect(),
        experiences: COMPANIES
            .iter()
            .map(|company| Experience {
                company: company.to_string(),
                title: String::new(),
            })
            .collect(),
        education: Vec::new(),
        summary: "Builds AI agents and go-to-market motions for AI/SaaS products.".to_string(),
        interests: INTERESTS.iter().map(|s| s.to_string()).collect(),
        tweets: None,
    }
}
