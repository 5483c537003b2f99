use std::env;
use std::str::FromStr;

use crate::error::RapportError;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Scraping
    pub apify_api_token: String,
    pub scrape_poll_interval_secs: u64,
    pub scrape_max_polls: u32,

    // AI provider
    pub anthropic_api_key: String,
    pub claude_model: String,
    pub compare_max_tokens: u32,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    /// Fails if either API credential is missing.
    pub fn from_env() -> Result<Self, RapportError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RapportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            apify_api_token: required(&lookup, "APIFY_API_TOKEN")?,
            scrape_poll_interval_secs: parsed(&lookup, "SCRAPE_POLL_INTERVAL_SECS", 5)?,
            scrape_max_polls: parsed(&lookup, "SCRAPE_MAX_POLLS", 60)?,
            anthropic_api_key: required(&lookup, "ANTHROPIC_API_KEY")?,
            claude_model: lookup("CLAUDE_MODEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string()),
            compare_max_tokens: parsed(&lookup, "COMPARE_MAX_TOKENS", 500)?,
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parsed(&lookup, "API_PORT", 3000)?,
        })
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.char_indices().nth(5).map(|(i, _)| i).unwrap_or(val.len());
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_API_TOKEN: {}", preview(&self.apify_api_token));
        tracing::info!("  ANTHROPIC_API_KEY: {}", preview(&self.anthropic_api_key));
        tracing::info!("  CLAUDE_MODEL: {}", self.claude_model);
        tracing::info!(
            "  SCRAPE_POLL: every {}s, max {} polls",
            self.scrape_poll_interval_secs,
            self.scrape_max_polls
        );
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, RapportError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| RapportError::ConfigurationMissing(key.to_string()))
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, RapportError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RapportError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}
