use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Lifecycle status of an actor run as reported by Apify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ActorRunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    TimingOut,
    TimedOut,
    Aborting,
    Aborted,
    #[serde(other)]
    Unknown,
}

impl ActorRunStatus {
    /// Returns true once the run can no longer change status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Aborted
        )
    }
}

impl std::fmt::Display for ActorRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "READY"),
            Self::Running => write!(f, "RUNNING"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Failed => write!(f, "FAILED"),
            Self::TimingOut => write!(f, "TIMING-OUT"),
            Self::TimedOut => write!(f, "TIMED-OUT"),
            Self::Aborting => write!(f, "ABORTING"),
            Self::Aborted => write!(f, "ABORTED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: ActorRunStatus,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunData {
    /// Wall time of a finished run. `None` until Apify reports both ends.
    pub fn duration(&self) -> Option<Duration> {
        Some(self.finished_at? - self.started_at?)
    }
}

/// A start URL entry, shared by most scraper inputs.
#[derive(Debug, Clone, Serialize)]
pub struct StartUrl {
    pub url: String,
}

/// Input accepted by the LinkedIn profile scraper actors.
/// Different actors read different keys, so both are sent.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedInProfileInput {
    #[serde(rename = "profileUrls")]
    pub profile_urls: Vec<String>,
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
}

/// Input for the apify/twitter-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct TwitterScraperInput {
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
    #[serde(rename = "maxTweets")]
    pub max_tweets: u32,
    #[serde(rename = "addUserInfo")]
    pub add_user_info: bool,
}

/// Input for the apidojo/tweet-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct TweetScraperInput {
    #[serde(rename = "twitterHandles")]
    pub twitter_handles: Vec<String>,
    #[serde(rename = "maxItems")]
    pub max_items: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_data_parses_apify_payload() {
        let json = r#"{
            "id": "run-1",
            "status": "TIMED-OUT",
            "statusMessage": "Actor exceeded its timeout",
            "defaultDatasetId": "ds-1",
            "startedAt": "2024-05-01T10:00:00.000Z",
            "finishedAt": null
        }"#;
        let run: RunData = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, ActorRunStatus::TimedOut);
        assert_eq!(run.default_dataset_id, "ds-1");
        assert!(run.status.is_terminal());
        assert!(run.duration().is_none());
    }

    #[test]
    fn finished_run_reports_duration() {
        let json = r#"{
            "id": "run-1",
            "status": "SUCCEEDED",
            "defaultDatasetId": "ds-1",
            "startedAt": "2024-05-01T10:00:00.000Z",
            "finishedAt": "2024-05-01T10:01:30.000Z"
        }"#;
        let run: RunData = serde_json::from_str(json).unwrap();
        assert_eq!(run.duration(), Some(Duration::seconds(90)));
    }

    #[test]
    fn unknown_status_is_not_terminal() {
        let status: ActorRunStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(status, ActorRunStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn twitter_input_uses_actor_field_names() {
        let input = TwitterScraperInput {
            start_urls: vec![StartUrl {
                url: "https://twitter.com/jdoe".to_string(),
            }],
            max_tweets: 50,
            add_user_info: true,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["startUrls"][0]["url"], "https://twitter.com/jdoe");
        assert_eq!(value["maxTweets"], 50);
        assert_eq!(value["addUserInfo"], true);
    }
}
