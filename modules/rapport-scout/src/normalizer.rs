// Profile normalizer: maps provider records of any known schema onto the
// canonical Profile.
//
// Each canonical attribute has an ordered table of candidate source fields.
// The first candidate that is present and non-empty wins. Dotted keys reach
// into nested objects (tweet scrapers nest the author under `author`/`user`).

use serde_json::Value;

use rapport_common::{Experience, Profile, RawRecord};

/// Where a canonical text attribute may come from.
#[derive(Debug, Clone, Copy)]
enum Source {
    Field(&'static str),
    /// Several fields joined with a space; all must be present.
    Joined(&'static [&'static str]),
}

use Source::{Field, Joined};

const NAME: &[Source] = &[
    Field("fullName"),
    Field("name"),
    Joined(&["firstName", "lastName"]),
    Field("profileName"),
    Field("author.name"),
    Field("user.name"),
];

const HEADLINE: &[Source] = &[
    Field("headline"),
    Field("headlineText"),
    Field("occupation"),
    Field("jobTitle"),
    Field("bio"),
    Field("description"),
    Field("author.description"),
    Field("user.description"),
];

const LOCATION: &[Source] = &[
    Field("location"),
    Field("locationName"),
    Field("geoLocationName"),
    Field("addressWithCountry"),
    Field("author.location"),
    Field("user.location"),
];

const SUMMARY: &[Source] = &[Field("summary"), Field("about")];

const SKILL_LISTS: &[&str] = &["skills", "topSkills"];
const SKILL_NAME: &[Source] = &[Field("name"), Field("title")];

const EXPERIENCE_LISTS: &[&str] = &["experiences", "positions", "experience"];
const EXPERIENCE_COMPANY: &[Source] = &[Field("companyName"), Field("company"), Field("subtitle")];
const EXPERIENCE_TITLE: &[Source] = &[Field("title"), Field("positionTitle"), Field("position")];

const EDUCATION_LISTS: &[&str] = &["education", "educations", "schools"];

const INTEREST_LISTS: &[&str] = &["interests"];

const TWEET_TEXT: &[Source] = &[Field("text"), Field("fullText"), Field("full_text")];

/// Map one provider record onto the canonical profile. Pure.
pub fn normalize(record: &RawRecord) -> Profile {
    Profile {
        name: first_text(record, NAME).unwrap_or_default(),
        headline: first_text(record, HEADLINE).unwrap_or_default(),
        location: first_text(record, LOCATION).unwrap_or_default(),
        skills: skills(record),
        experiences: experiences(record),
        education: first_list(record, EDUCATION_LISTS)
            .map(|items| items.to_vec())
            .unwrap_or_default(),
        summary: first_text(record, SUMMARY).unwrap_or_default(),
        interests: first_list(record, INTEREST_LISTS)
            .map(|items| items.iter().filter_map(non_empty_str).collect())
            .unwrap_or_default(),
        tweets: None,
    }
}

/// Tweet text across a whole result set, joined in record order.
/// `None` when no record carries any text.
pub fn collect_tweets(records: &[RawRecord]) -> Option<String> {
    let texts: Vec<String> = records
        .iter()
        .filter_map(|record| first_text(record, TWEET_TEXT))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join(" "))
    }
}

fn skills(record: &RawRecord) -> Vec<String> {
    let Some(value) = first_present(record, SKILL_LISTS) else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(_) => non_empty_str(item),
                Value::Object(_) => first_text(item, SKILL_NAME),
                _ => None,
            })
            .collect(),
        // Some scrapers flatten skills into "A • B • C" or "A, B, C".
        Value::String(joined) => joined
            .split(['•', ',', '|'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn experiences(record: &RawRecord) -> Vec<Experience> {
    first_list(record, EXPERIENCE_LISTS)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| Experience {
                    company: first_text(item, EXPERIENCE_COMPANY).unwrap_or_default(),
                    title: first_text(item, EXPERIENCE_TITLE).unwrap_or_default(),
                })
                .filter(|e| !e.company.is_empty() || !e.title.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

// --- Probing helpers ---

fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, key| value.get(key))
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn text_from(record: &Value, source: Source) -> Option<String> {
    match source {
        Field(path) => lookup(record, path).and_then(non_empty_str),
        Joined(paths) => {
            let parts = paths
                .iter()
                .map(|path| lookup(record, path).and_then(non_empty_str))
                .collect::<Option<Vec<_>>>()?;
            Some(parts.join(" "))
        }
    }
}

fn first_text(record: &Value, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| text_from(record, *source))
}

/// First candidate key whose value is present and not null/empty.
fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| lookup(record, key))
        .find(|value| match value {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn first_list<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| lookup(record, key)?.as_array())
        .find(|items| !items.is_empty())
}
