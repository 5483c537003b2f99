use std::fmt::Write;

use ai_client::truncate_to_char_boundary;
use rapport_common::Profile;

use super::overlap::Overlaps;

const NOT_SPECIFIED: &str = "Not specified";

/// Long free text is cut so one verbose profile cannot crowd out the other.
const MAX_FREE_TEXT_BYTES: usize = 1500;

const EDUCATION_NAME_KEYS: &[&str] = &["schoolName", "school", "title", "name"];

/// Render a profile as fixed `Field: value` lines.
pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    line(&mut out, "Name", &profile.name);
    line(&mut out, "Headline", &profile.headline);
    line(&mut out, "Location", &profile.location);
    line(&mut out, "Skills", &profile.skills.join(", "));

    let experience = profile
        .experiences
        .iter()
        .map(|e| match (e.title.trim(), e.company.trim()) {
            ("", company) => company.to_string(),
            (title, "") => title.to_string(),
            (title, company) => format!("{title} at {company}"),
        })
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    line(&mut out, "Experience", &experience);

    let education = profile
        .education
        .iter()
        .filter_map(|record| {
            EDUCATION_NAME_KEYS
                .iter()
                .find_map(|key| record.get(key)?.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .collect::<Vec<_>>()
        .join("; ");
    line(&mut out, "Education", &education);

    line(
        &mut out,
        "Summary",
        truncate_to_char_boundary(profile.summary.trim(), MAX_FREE_TEXT_BYTES),
    );
    line(&mut out, "Interests", &profile.interests.join(", "));
    if let Some(ref tweets) = profile.tweets {
        line(
            &mut out,
            "Recent tweets",
            truncate_to_char_boundary(tweets.trim(), MAX_FREE_TEXT_BYTES),
        );
    }
    out
}

fn line(out: &mut String, field: &str, value: &str) {
    let value = value.trim();
    let value = if value.is_empty() { NOT_SPECIFIED } else { value };
    let _ = writeln!(out, "{field}: {value}");
}

/// The single instruction prompt sent to the LLM.
pub fn build_prompt(user: &Profile, reference: &Profile, overlaps: &Overlaps) -> String {
    let mut prompt = String::new();
    let reference_name = if reference.name.trim().is_empty() {
        "the reference person"
    } else {
        reference.name.trim()
    };

    let _ = writeln!(
        prompt,
        "You are preparing conversation starters for someone about to meet {reference_name}. \
         Compare the PROFILE below with {reference_name}'s REFERENCE profile and write talking points."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "PROFILE:");
    prompt.push_str(&render_profile(user));
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "REFERENCE ({reference_name}):");
    prompt.push_str(&render_profile(reference));

    if !overlaps.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "DETECTED OVERLAPS (may be incomplete):");
        for item in overlaps.commonalities.iter().chain(&overlaps.differences) {
            let _ = writeln!(prompt, "- {item}");
        }
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Rules:");
    let _ = writeln!(prompt, "- Write exactly 3 or 4 points.");
    let _ = writeln!(
        prompt,
        "- Prioritize commonalities over differences. Mention a difference only when there are fewer than 3 real commonalities."
    );
    let _ = writeln!(prompt, "- Each point is one short, specific sentence.");
    let _ = writeln!(
        prompt,
        "- Respond with JSON only, exactly in this shape: {{\"points\": [\"...\", \"...\"]}}"
    );
    prompt
}
