use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use rapport_common::Profile;
use rapport_scout::{Comparator, ScrapeOrchestrator};

pub mod rest;

/// Process-wide request state. Everything in here is read-only after startup.
pub struct AppState {
    pub orchestrator: ScrapeOrchestrator,
    pub comparator: Comparator,
    pub reference: Arc<Profile>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        .route(
            "/compare",
            post(rest::compare::api_compare).fallback(rest::method_not_allowed),
        )
        // Path the web frontend posts to
        .route(
            "/api/compare",
            post(rest::compare::api_compare).fallback(rest::method_not_allowed),
        )
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path only; profile URLs stay out of the span
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
