use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rapport_common::{ProfileKind, ProfileSummary, RapportError};

use super::error_response;
use crate::AppState;

#[derive(Deserialize)]
pub struct CompareRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub points: Vec<String>,
    pub profile: ProfileSummary,
}

/// `POST /compare`: scrape the profile at `url` and compare it with the
/// reference profile.
pub async fn api_compare(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let url = match body {
        Ok(Json(req)) => req.url.unwrap_or_default(),
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable compare request body");
            String::new()
        }
    };

    let (url, kind) = match validate(&url) {
        Ok(valid) => valid,
        Err(RapportError::InvalidInput(message)) => {
            return error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    info!(%kind, "Comparing profile");
    let profile = state.orchestrator.acquire(url, kind).await;
    let result = state.comparator.compare(&profile, &state.reference).await;
    info!(%kind, points = result.points.len(), "Comparison complete");

    Json(CompareResponse {
        points: result.points,
        profile: profile.summary_view(),
    })
    .into_response()
}

fn validate(url: &str) -> Result<(&str, ProfileKind), RapportError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RapportError::InvalidInput("URL is required".to_string()));
    }
    let kind = ProfileKind::from_url(url).ok_or_else(|| {
        RapportError::InvalidInput("Please provide a LinkedIn or Twitter URL".to_string())
    })?;
    Ok((url, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_is_required() {
        let err = validate("   ").unwrap_err();
        assert!(matches!(err, RapportError::InvalidInput(ref m) if m == "URL is required"));
    }

    #[test]
    fn unsupported_host_is_rejected() {
        let err = validate("https://facebook.com/jdoe").unwrap_err();
        assert!(matches!(err, RapportError::InvalidInput(ref m) if m.contains("LinkedIn or Twitter")));
    }

    #[test]
    fn supported_urls_are_trimmed_and_classified() {
        assert_eq!(
            validate("  https://x.com/jdoe ").unwrap(),
            ("https://x.com/jdoe", ProfileKind::TwitterLike)
        );
    }
}
