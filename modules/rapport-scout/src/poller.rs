use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use rapport_common::{RawRecord, RunStatus};

use crate::error::ScrapeError;
use crate::traits::RunBackend;

/// How often and how long to poll a submitted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_polls: u32,
}

impl PollConfig {
    pub fn new(interval: Duration, max_polls: u32) -> Self {
        Self {
            interval,
            max_polls,
        }
    }

    /// Worst-case wall time spent waiting on one run.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_polls
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 60)
    }
}

/// Submits one scrape job and drives it to a terminal state.
#[derive(Clone)]
pub struct RunPoller {
    backend: Arc<dyn RunBackend>,
    config: PollConfig,
}

impl RunPoller {
    pub fn new(backend: Arc<dyn RunBackend>, config: PollConfig) -> Self {
        Self { backend, config }
    }

    /// Submit `input` to `identity`, poll until the run settles, and return
    /// every record it produced. A succeeded run with no records is `Ok(vec![])`.
    pub async fn run(&self, identity: &str, input: &Value) -> Result<Vec<RawRecord>, ScrapeError> {
        let handle = self
            .backend
            .submit_run(identity, input)
            .await
            .map_err(|e| ScrapeError::backend(identity, e))?;
        info!(identity, run_id = %handle.run_id, "Scrape run submitted, polling for completion");

        for poll in 1..=self.config.max_polls {
            let state = self
                .backend
                .run_status(&handle.run_id)
                .await
                .map_err(|e| ScrapeError::backend(identity, e))?;

            match state.status {
                RunStatus::Pending => {
                    debug!(identity, run_id = %handle.run_id, poll, "Run still in progress");
                    if poll < self.config.max_polls {
                        tokio::time::sleep(self.config.interval).await;
                    }
                }
                RunStatus::Succeeded => {
                    let records = self
                        .backend
                        .dataset_items(&handle.dataset_id)
                        .await
                        .map_err(|e| ScrapeError::backend(identity, e))?;
                    info!(
                        identity,
                        run_id = %handle.run_id,
                        dataset_id = %handle.dataset_id,
                        count = records.len(),
                        "Run completed, fetched results"
                    );
                    return Ok(records);
                }
                RunStatus::Failed | RunStatus::Aborted => {
                    let status_message = state
                        .status_message
                        .unwrap_or_else(|| state.status.to_string());
                    warn!(identity, run_id = %handle.run_id, status = %state.status, %status_message, "Run did not succeed");
                    return Err(ScrapeError::ProviderRunFailed {
                        identity: identity.to_string(),
                        status_message,
                    });
                }
                RunStatus::TimedOut => {
                    warn!(identity, run_id = %handle.run_id, "Provider reported run timed out");
                    return Err(ScrapeError::ProviderRunTimedOut {
                        identity: identity.to_string(),
                    });
                }
            }
        }

        warn!(
            identity,
            run_id = %handle.run_id,
            max_polls = self.config.max_polls,
            "Run still pending after poll budget"
        );
        Err(ScrapeError::ProviderRunTimedOut {
            identity: identity.to_string(),
        })
    }
}
