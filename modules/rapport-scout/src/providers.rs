// Provider registry: which scraper actors to try for each profile kind, in
// fallback order, and how each one wants its input shaped.

use serde_json::Value;

use apify_client::{LinkedInProfileInput, StartUrl, TweetScraperInput, TwitterScraperInput};
use rapport_common::{profile_handle, ProfileKind};

use crate::error::ScrapeError;

/// Builds the provider-specific input payload from a profile URL.
pub type InputBuilder = fn(&str) -> Result<Value, ScrapeError>;

/// One scraper in a fallback chain.
#[derive(Clone, Copy)]
pub struct ProviderSpec {
    pub identity: &'static str,
    pub build_input: InputBuilder,
}

impl std::fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Actor ID from the Apify console for a LinkedIn profile scraper.
const LINKEDIN_PROFILE_SCRAPER: &str = "2SyF0bVxmgGr8IVCZ";

/// Store path of the dev_fusion LinkedIn profile scraper.
const DEV_FUSION_LINKEDIN: &str = "dev_fusion/Linkedin-Profile-Scraper";

/// Store path of apify/twitter-scraper.
const TWITTER_SCRAPER: &str = "apify/twitter-scraper";

/// Actor ID for apidojo/tweet-scraper.
const TWEET_SCRAPER: &str = "61RPP7dywgiy0JPD0";

const MAX_TWEETS: u32 = 50;

pub const LINKEDIN_PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        identity: LINKEDIN_PROFILE_SCRAPER,
        build_input: linkedin_input,
    },
    ProviderSpec {
        identity: DEV_FUSION_LINKEDIN,
        build_input: linkedin_input,
    },
];

pub const TWITTER_PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        identity: TWITTER_SCRAPER,
        build_input: twitter_scraper_input,
    },
    ProviderSpec {
        identity: TWEET_SCRAPER,
        build_input: tweet_scraper_input,
    },
];

/// Ordered provider lists per profile kind. First listed is tried first.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    linkedin: Vec<ProviderSpec>,
    twitter: Vec<ProviderSpec>,
}

impl ProviderRegistry {
    pub fn new(linkedin: Vec<ProviderSpec>, twitter: Vec<ProviderSpec>) -> Self {
        Self { linkedin, twitter }
    }

    pub fn providers(&self, kind: ProfileKind) -> &[ProviderSpec] {
        match kind {
            ProfileKind::LinkedIn => &self.linkedin,
            ProfileKind::TwitterLike => &self.twitter,
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(LINKEDIN_PROVIDERS.to_vec(), TWITTER_PROVIDERS.to_vec())
    }
}

// --- Input builders ---

fn linkedin_input(url: &str) -> Result<Value, ScrapeError> {
    let url = url.trim().to_string();
    let input = LinkedInProfileInput {
        profile_urls: vec![url.clone()],
        start_urls: vec![StartUrl { url }],
    };
    Ok(serde_json::to_value(input)?)
}

fn twitter_scraper_input(url: &str) -> Result<Value, ScrapeError> {
    let handle = twitter_handle(url)?;
    let input = TwitterScraperInput {
        start_urls: vec![StartUrl {
            url: format!("https://twitter.com/{handle}"),
        }],
        max_tweets: MAX_TWEETS,
        add_user_info: true,
    };
    Ok(serde_json::to_value(input)?)
}

fn tweet_scraper_input(url: &str) -> Result<Value, ScrapeError> {
    let handle = twitter_handle(url)?;
    let input = TweetScraperInput {
        twitter_handles: vec![handle],
        max_items: MAX_TWEETS,
    };
    Ok(serde_json::to_value(input)?)
}

fn twitter_handle(url: &str) -> Result<String, ScrapeError> {
    profile_handle(url, ProfileKind::TwitterLike).ok_or_else(|| ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: "no Twitter/X handle in URL".to_string(),
    })
}
