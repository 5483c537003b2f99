use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::Claude;
use apify_client::ApifyClient;
use rapport_api::{build_router, AppState};
use rapport_common::{reference_profile, Config};
use rapport_scout::{Comparator, PollConfig, RunPoller, ScrapeOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rapport=info".parse()?))
        .init();

    // Missing credentials stop the process before anything binds.
    let config = Config::from_env()?;

    let apify = Arc::new(ApifyClient::new(config.apify_api_token.clone()));
    let poll = PollConfig::new(
        Duration::from_secs(config.scrape_poll_interval_secs),
        config.scrape_max_polls,
    );
    let orchestrator = ScrapeOrchestrator::new(RunPoller::new(apify, poll));

    let claude = Arc::new(Claude::new(
        config.anthropic_api_key.clone(),
        config.claude_model.clone(),
    ));
    let comparator = Comparator::new(claude).with_max_tokens(config.compare_max_tokens);

    let state = Arc::new(AppState {
        orchestrator,
        comparator,
        reference: Arc::new(reference_profile()),
    });
    let app = build_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!(
        poll_budget_secs = poll.budget().as_secs(),
        "Rapport API starting on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
