// Trait seams for the two outbound backends.
//
// RunBackend wraps the scraping job queue (Apify in production).
// LanguageModel wraps the completion endpoint (Claude in production).
//
// Both exist so orchestration and comparison run against MockBackend and
// MockLanguageModel in tests: no network, no credentials.

use anyhow::Result;
use async_trait::async_trait;

use ai_client::Claude;
use apify_client::{ActorRunStatus, ApifyClient};
use rapport_common::{RawRecord, RunHandle, RunState, RunStatus};

// ---------------------------------------------------------------------------
// RunBackend
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RunBackend: Send + Sync {
    /// Submit a job to the named provider and return its identifiers.
    async fn submit_run(&self, provider: &str, input: &serde_json::Value) -> Result<RunHandle>;

    /// Read the current status of a submitted run.
    async fn run_status(&self, run_id: &str) -> Result<RunState>;

    /// List every record a finished run produced.
    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>>;
}

#[async_trait]
impl RunBackend for ApifyClient {
    async fn submit_run(&self, provider: &str, input: &serde_json::Value) -> Result<RunHandle> {
        let run = self.start_run(provider, input).await?;
        Ok(RunHandle {
            run_id: run.id,
            dataset_id: run.default_dataset_id,
        })
    }

    async fn run_status(&self, run_id: &str) -> Result<RunState> {
        let run = self.get_run(run_id).await?;
        Ok(RunState {
            status: run_status_from_apify(run.status),
            status_message: run.status_message,
        })
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>> {
        Ok(self.get_dataset_items(dataset_id).await?)
    }
}

/// Transitional Apify states (`TIMING-OUT`, `ABORTING`) are still pending:
/// the run has not settled yet.
fn run_status_from_apify(status: ActorRunStatus) -> RunStatus {
    match status {
        ActorRunStatus::Succeeded => RunStatus::Succeeded,
        ActorRunStatus::Failed => RunStatus::Failed,
        ActorRunStatus::Aborted => RunStatus::Aborted,
        ActorRunStatus::TimedOut => RunStatus::TimedOut,
        ActorRunStatus::Ready
        | ActorRunStatus::Running
        | ActorRunStatus::TimingOut
        | ActorRunStatus::Aborting
        | ActorRunStatus::Unknown => RunStatus::Pending,
    }
}

// ---------------------------------------------------------------------------
// LanguageModel
// ---------------------------------------------------------------------------

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// One single-turn completion with an output budget. Free-form text back.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

#[async_trait]
impl LanguageModel for Claude {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        Claude::complete(self, prompt, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apify_transitional_states_keep_polling() {
        assert_eq!(run_status_from_apify(ActorRunStatus::Running), RunStatus::Pending);
        assert_eq!(run_status_from_apify(ActorRunStatus::TimingOut), RunStatus::Pending);
        assert_eq!(run_status_from_apify(ActorRunStatus::Aborting), RunStatus::Pending);
        assert_eq!(run_status_from_apify(ActorRunStatus::Unknown), RunStatus::Pending);
    }

    #[test]
    fn apify_terminal_states_map_one_to_one() {
        assert_eq!(run_status_from_apify(ActorRunStatus::Succeeded), RunStatus::Succeeded);
        assert_eq!(run_status_from_apify(ActorRunStatus::Failed), RunStatus::Failed);
        assert_eq!(run_status_from_apify(ActorRunStatus::Aborted), RunStatus::Aborted);
        assert_eq!(run_status_from_apify(ActorRunStatus::TimedOut), RunStatus::TimedOut);
    }
}
