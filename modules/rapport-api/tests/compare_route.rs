// Router-level tests: real axum router, mocked scrape backend and LLM.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rapport_api::{build_router, AppState};
use rapport_common::reference_profile;
use rapport_scout::providers::LINKEDIN_PROVIDERS;
use rapport_scout::testing::{linkedin_record, MockBackend, MockLanguageModel, ScriptedRun};
use rapport_scout::{Comparator, PollConfig, RunPoller, ScrapeOrchestrator};

fn app(backend: Arc<MockBackend>, llm: Arc<MockLanguageModel>) -> Router {
    let poller = RunPoller::new(backend, PollConfig::new(Duration::ZERO, 3));
    build_router(Arc::new(AppState {
        orchestrator: ScrapeOrchestrator::new(poller),
        comparator: Comparator::new(llm),
        reference: Arc::new(reference_profile()),
    }))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn jdoe_backend() -> Arc<MockBackend> {
    Arc::new(MockBackend::new().on_run(
        LINKEDIN_PROVIDERS[0].identity,
        ScriptedRun::Records(vec![linkedin_record(
            "Jane Doe",
            "Engineer",
            &["Prompt engineering"],
        )]),
    ))
}

#[tokio::test]
async fn linkedin_url_returns_points_and_profile() {
    let llm = Arc::new(MockLanguageModel::replying(
        r#"{"points":["Shared skill: prompt engineering","Ask what they are building"]}"#,
    ));

    let response = app(jdoe_backend(), llm)
        .oneshot(post_json(
            "/compare",
            json!({"url": "https://linkedin.com/in/jdoe"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body = read_json(response).await;
    let points = body["points"].as_array().unwrap();
    assert!((1..=4).contains(&points.len()));
    assert_eq!(points[0], "Shared skill: prompt engineering");
    assert_eq!(body["profile"]["name"], "Jane Doe");
    assert_eq!(body["profile"]["headline"], "Engineer");
    assert_eq!(body["profile"]["location"], "");
}

#[tokio::test]
async fn api_prefixed_alias_serves_the_same_handler() {
    let llm = Arc::new(MockLanguageModel::replying(r#"{"points":["One","Two","Three"]}"#));

    let response = app(jdoe_backend(), llm)
        .oneshot(post_json(
            "/api/compare",
            json!({"url": "https://www.linkedin.com/in/jdoe/"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["points"], json!(["One", "Two", "Three"]));
}

#[tokio::test]
async fn unsupported_host_is_rejected_without_backend_calls() {
    let backend = Arc::new(MockBackend::new());
    let llm = Arc::new(MockLanguageModel::replying("unused"));

    let response = app(backend.clone(), llm.clone())
        .oneshot(post_json("/compare", json!({"url": "https://facebook.com/jdoe"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        "Please provide a LinkedIn or Twitter URL"
    );
    assert!(backend.untouched());
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn missing_or_blank_url_is_a_bad_request() {
    for body in [json!({}), json!({"url": "   "}), json!({"url": null})] {
        let backend = Arc::new(MockBackend::new());
        let response = app(backend.clone(), Arc::new(MockLanguageModel::replying("unused")))
            .oneshot(post_json("/compare", body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(read_json(response).await["error"], "URL is required");
        assert!(backend.untouched());
    }
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/compare")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(
        Arc::new(MockBackend::new()),
        Arc::new(MockLanguageModel::replying("unused")),
    )
    .oneshot(request)
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_on_compare_is_method_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/compare")
        .body(Body::empty())
        .unwrap();

    let response = app(
        Arc::new(MockBackend::new()),
        Arc::new(MockLanguageModel::replying("unused")),
    )
    .oneshot(request)
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(read_json(response).await["error"], "Method not allowed");
}

#[tokio::test]
async fn health_check_returns_ok() {
    let response = app(
        Arc::new(MockBackend::new()),
        Arc::new(MockLanguageModel::replying("unused")),
    )
    .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
