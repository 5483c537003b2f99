use rapport_common::ProfileKind;
use thiserror::Error;

/// Failures while acquiring a profile. Per-provider variants are recovered by
/// falling back to the next provider; exhaustion is recovered by a degraded
/// profile. None of these reach a caller of `acquire`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Cannot build provider input from {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Provider {identity} run failed: {status_message}")]
    ProviderRunFailed {
        identity: String,
        status_message: String,
    },

    #[error("Provider {identity} run timed out")]
    ProviderRunTimedOut { identity: String },

    #[error("Provider {identity} backend error: {message}")]
    Backend { identity: String, message: String },

    #[error("All {kind} providers exhausted after {attempts} attempts")]
    ScrapeExhausted { kind: ProfileKind, attempts: usize },

    #[error("Failed to encode provider input: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ScrapeError {
    pub(crate) fn backend(identity: &str, err: anyhow::Error) -> Self {
        ScrapeError::Backend {
            identity: identity.to_string(),
            message: format!("{err:#}"),
        }
    }
}

/// Failures inside the comparison step. The comparator turns every one of
/// these into fallback points.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("LLM call failed: {0}")]
    Llm(#[source] anyhow::Error),

    #[error("LLM response could not be decoded into points")]
    UnparsableComparison,
}
