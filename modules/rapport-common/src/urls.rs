use std::sync::LazyLock;

use regex::Regex;

use crate::types::ProfileKind;

static RE_LINKEDIN_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)?linkedin\.com(?:[/?#]|$)").unwrap()
});
static RE_TWITTER_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.|mobile\.)?(?:twitter|x)\.com(?:[/?#]|$)").unwrap()
});
static RE_LINKEDIN_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/(?:in|pub)/([^/?#]+)").unwrap()
});
static RE_TWITTER_HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:twitter|x)\.com/@?([A-Za-z0-9_]+)").unwrap()
});

/// Paths on twitter.com / x.com that are not user handles.
const TWITTER_RESERVED: &[&str] = &["home", "explore", "search", "i", "intent", "hashtag", "share"];

impl ProfileKind {
    /// Classify a profile URL by its host. Unsupported hosts return `None`.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        if RE_LINKEDIN_HOST.is_match(url) {
            Some(Self::LinkedIn)
        } else if RE_TWITTER_HOST.is_match(url) {
            Some(Self::TwitterLike)
        } else {
            None
        }
    }
}

/// Extract the account identifier from a profile URL: the `/in/<slug>` part
/// for LinkedIn, the handle for Twitter/X.
pub fn profile_handle(url: &str, kind: ProfileKind) -> Option<String> {
    let url = url.trim();
    match kind {
        ProfileKind::LinkedIn => RE_LINKEDIN_SLUG
            .captures(url)
            .map(|caps| caps[1].trim_end_matches('/').to_string())
            .filter(|slug| !slug.is_empty()),
        ProfileKind::TwitterLike => RE_TWITTER_HANDLE
            .captures(url)
            .map(|caps| caps[1].to_string())
            .filter(|handle| !TWITTER_RESERVED.contains(&handle.to_lowercase().as_str())),
    }
}
