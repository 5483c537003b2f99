pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    ActorRunStatus, LinkedInProfileInput, RunData, StartUrl, TweetScraperInput,
    TwitterScraperInput,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

#[derive(Clone)]
pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Start an actor run. Returns immediately with run metadata.
    ///
    /// `actor_id` is either a hash id or a `username/actor-name` store path.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_path(actor_id));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        tracing::info!(actor_id, run_id = %api_resp.data.id, "Apify run started");
        Ok(api_resp.data)
    }

    /// Fetch the current metadata of a run without waiting.
    pub async fn get_run(&self, run_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-runs/{}", self.base_url, run_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        let run = api_resp.data;
        if run.status.is_terminal() {
            tracing::info!(
                run_id,
                status = %run.status,
                duration_secs = run.duration().map(|d| d.num_seconds()),
                "Run finished"
            );
        } else {
            tracing::debug!(run_id, status = %run.status, "Fetched run status");
        }
        Ok(run)
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&clean=true",
            self.base_url, dataset_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let items: Vec<T> = resp.json().await?;
        tracing::info!(dataset_id, count = items.len(), "Fetched dataset items");
        Ok(items)
    }
}

/// Store paths use `~` in place of `/` inside API URLs.
fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApifyError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(resp)
}
