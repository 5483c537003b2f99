use serde::{Deserialize, Serialize};

// --- Profile kinds ---

/// Which family of social network a profile URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    LinkedIn,
    /// Twitter and X share one scraper family.
    TwitterLike,
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileKind::LinkedIn => write!(f, "linkedin"),
            ProfileKind::TwitterLike => write!(f, "twitter"),
        }
    }
}

// --- Scrape runs ---

/// Identifiers returned when a scrape job is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub run_id: String,
    pub dataset_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pending,
    Succeeded,
    Failed,
    Aborted,
    TimedOut,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "pending"),
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Failed => write!(f, "failed"),
            RunStatus::Aborted => write!(f, "aborted"),
            RunStatus::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// One observation of a run's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub status: RunStatus,
    pub status_message: Option<String>,
}

impl RunState {
    pub fn new(status: RunStatus) -> Self {
        Self {
            status,
            status_message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }
}

/// A provider-specific output record. Schemas differ per provider.
pub type RawRecord = serde_json::Value;

// --- Canonical profile ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub title: String,
}

/// Provider-agnostic view of a person's public profile.
///
/// Every field may be empty. A profile with nothing populated is still valid;
/// it means acquisition came back with nothing usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    pub education: Vec<serde_json::Value>,
    pub summary: String,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets: Option<String>,
}

impl Profile {
    /// True when there is nothing to describe the person with: no name,
    /// headline or summary.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.headline.trim().is_empty()
            && self.summary.trim().is_empty()
    }

    /// Company names in experience order, blanks skipped.
    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.experiences
            .iter()
            .map(|e| e.company.trim())
            .filter(|c| !c.is_empty())
    }

    /// The short identity echoed back to callers alongside comparison points.
    pub fn summary_view(&self) -> ProfileSummary {
        ProfileSummary {
            name: self.name.clone(),
            headline: self.headline.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub headline: String,
    pub location: String,
}

// --- Comparison output ---

/// Talking points comparing a profile with the reference profile.
/// Always holds between one and four points once handed to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub points: Vec<String>,
}

impl ComparisonResult {
    pub const MAX_POINTS: usize = 4;

    pub fn new(points: Vec<String>) -> Self {
        Self { points }
    }

    pub fn single(point: impl Into<String>) -> Self {
        Self {
            points: vec![point.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_displays_snake_case() {
        assert_eq!(RunStatus::Aborted.to_string(), "aborted");
        assert_eq!(RunStatus::TimedOut.to_string(), "timed_out");
    }

    #[test]
    fn default_profile_is_blank() {
        assert!(Profile::default().is_blank());
    }

    #[test]
    fn whitespace_only_fields_count_as_blank() {
        let profile = Profile {
            name: "  ".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        assert!(profile.is_blank());
    }

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let profile: Profile = serde_json::from_str(r#"{"name": "Jane Doe"}"#).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert!(profile.skills.is_empty());
        assert!(profile.tweets.is_none());
    }

    #[test]
    fn companies_skip_blank_entries() {
        let profile = Profile {
            experiences: vec![
                Experience {
                    company: "Teamflow".to_string(),
                    title: "AE".to_string(),
                },
                Experience {
                    company: " ".to_string(),
                    title: "Advisor".to_string(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(profile.companies().collect::<Vec<_>>(), vec!["Teamflow"]);
    }
}
