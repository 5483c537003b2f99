// Rule-based overlap detection between two profiles. The findings are handed
// to the LLM as hints; they are never returned to callers directly.

use rapport_common::Profile;

const MAX_LISTED_SKILLS: usize = 5;

const TECH_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "saas",
    "software",
    "tech",
    "technology",
    "startup",
];

/// Aliases that count as the same city as the key.
const CITY_ALIASES: &[(&str, &[&str])] = &[("san francisco", &["sf", "bay area", "san francisco"])];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlaps {
    pub commonalities: Vec<String>,
    pub differences: Vec<String>,
}

impl Overlaps {
    pub fn is_empty(&self) -> bool {
        self.commonalities.is_empty() && self.differences.is_empty()
    }
}

pub fn detect(user: &Profile, reference: &Profile) -> Overlaps {
    let mut overlaps = Overlaps::default();

    let shared_skills: Vec<&str> = user
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|skill| {
            !skill.is_empty()
                && reference
                    .skills
                    .iter()
                    .any(|theirs| contains_either_way(skill, theirs))
        })
        .collect();
    if !shared_skills.is_empty() {
        let listed = shared_skills[..shared_skills.len().min(MAX_LISTED_SKILLS)].join(", ");
        let more = if shared_skills.len() > MAX_LISTED_SKILLS { "..." } else { "" };
        overlaps
            .commonalities
            .push(format!("Shared skills: {listed}{more}"));
    }

    let user_location = user.location.trim();
    if !user_location.is_empty() && !reference.location.trim().is_empty() {
        if same_city(user_location, &reference.location) {
            overlaps
                .commonalities
                .push(format!("Both based in {}", reference.location));
        } else {
            overlaps.differences.push(format!(
                "Location: {} ({} is in {})",
                user_location, reference.name, reference.location
            ));
        }
    }

    let shared_companies: Vec<&str> = user
        .companies()
        .filter(|company| {
            reference
                .companies()
                .any(|theirs| contains_either_way(company, theirs))
        })
        .collect();
    if !shared_companies.is_empty() {
        overlaps.commonalities.push(format!(
            "Shared companies: {}",
            shared_companies.join(", ")
        ));
    }

    let text = free_text(user);
    let tokens = words(&text);
    let interests: Vec<&str> = reference
        .interests
        .iter()
        .map(String::as_str)
        .filter(|interest| mentions(&text, &tokens, interest))
        .collect();
    if !interests.is_empty() {
        overlaps
            .commonalities
            .push(format!("Shared interests: {}", interests.join(", ")));
    }

    if TECH_KEYWORDS
        .iter()
        .any(|keyword| mentions(&text, &tokens, keyword))
    {
        overlaps
            .commonalities
            .push("Both in tech/AI industry".to_string());
    }

    overlaps
}

fn contains_either_way(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

fn same_city(user_location: &str, reference_location: &str) -> bool {
    let user_lower = user_location.to_lowercase();
    let reference_lower = reference_location.trim().to_lowercase();
    if user_lower.contains(&reference_lower) {
        return true;
    }
    let tokens = words(&user_lower);
    CITY_ALIASES
        .iter()
        .filter(|(city, _)| *city == reference_lower)
        .flat_map(|(_, aliases)| aliases.iter())
        .any(|alias| mentions(&user_lower, &tokens, alias))
}

/// Headline, summary and tweets, lowercased into one blob.
fn free_text(profile: &Profile) -> String {
    [
        profile.headline.as_str(),
        profile.summary.as_str(),
        profile.tweets.as_deref().unwrap_or_default(),
    ]
    .join(" ")
    .to_lowercase()
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Single words match whole tokens only ("ai" must not match "said");
/// phrases match as substrings.
fn mentions(text: &str, tokens: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.contains(' ') {
        text.contains(&needle)
    } else {
        tokens.iter().any(|t| *t == needle)
    }
}
