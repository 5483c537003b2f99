// Comparator: turns a scraped profile and the reference profile into 1–4
// talking points.
//
// Guarding → Prompting → AwaitingLLM → Decoding → Bounding → Done, with every
// failure landing on a fallback result instead of an error.

pub mod decode;
pub mod overlap;
pub mod prompt;

use std::sync::Arc;

use tracing::{debug, info, warn};

use rapport_common::{ComparisonResult, Profile};

use crate::error::CompareError;
use crate::traits::LanguageModel;

pub use decode::decode_points;

pub const DEFAULT_MAX_TOKENS: u32 = 500;

pub const BLANK_PROFILE_POINT: &str =
    "We couldn't read enough of this profile to compare it. Try a public profile URL that shows a name or headline.";

pub const ERROR_POINT: &str =
    "We couldn't generate talking points right now. Please try again in a moment.";

pub const GENERIC_POINTS: [&str; 3] = [
    "Ask what they're building right now and what the hardest part has been.",
    "Compare notes on how AI is changing the way each of you works day to day.",
    "Swap favorite ways to recharge outside work, from hiking to a good podcast.",
];

#[derive(Clone)]
pub struct Comparator {
    llm: Arc<dyn LanguageModel>,
    max_tokens: u32,
}

impl Comparator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Compare `user` against `reference`. Always returns 1–4 non-empty points.
    pub async fn compare(&self, user: &Profile, reference: &Profile) -> ComparisonResult {
        if user.is_blank() {
            info!("Profile has no name, headline or summary; skipping LLM");
            return ComparisonResult::single(BLANK_PROFILE_POINT);
        }

        match self.try_compare(user, reference).await {
            Ok(points) => bound(points),
            Err(CompareError::UnparsableComparison) => {
                warn!("LLM response had no decodable points, using generic fallback");
                generic_fallback()
            }
            Err(e) => {
                warn!(error = %e, "Comparison failed, using error fallback");
                ComparisonResult::single(ERROR_POINT)
            }
        }
    }

    async fn try_compare(
        &self,
        user: &Profile,
        reference: &Profile,
    ) -> Result<Vec<String>, CompareError> {
        let overlaps = overlap::detect(user, reference);
        let prompt = prompt::build_prompt(user, reference, &overlaps);
        debug!(
            prompt_len = prompt.len(),
            hints = overlaps.commonalities.len() + overlaps.differences.len(),
            "Comparison prompt built"
        );

        let text = self
            .llm
            .complete(&prompt, self.max_tokens)
            .await
            .map_err(CompareError::Llm)?;
        debug!(response_len = text.len(), "LLM responded");

        decode_points(&text)
    }
}

/// Clamp to the maximum point count; an empty list becomes the generic fallback.
fn bound(mut points: Vec<String>) -> ComparisonResult {
    points.retain(|p| !p.trim().is_empty());
    if points.is_empty() {
        return generic_fallback();
    }
    points.truncate(ComparisonResult::MAX_POINTS);
    ComparisonResult::new(points)
}

fn generic_fallback() -> ComparisonResult {
    ComparisonResult::new(GENERIC_POINTS.iter().map(|p| p.to_string()).collect())
}
