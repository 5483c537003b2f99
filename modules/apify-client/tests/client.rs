//! HTTP-level tests for `ApifyClient` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apify_client::{ActorRunStatus, ApifyClient, ApifyError, LinkedInProfileInput, StartUrl};

fn test_client(server: &MockServer) -> ApifyClient {
    ApifyClient::new("test-token".to_string()).with_base_url(server.uri())
}

fn run_json(status: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": "run-123",
            "status": status,
            "defaultDatasetId": "ds-456",
            "startedAt": "2024-05-01T10:00:00.000Z",
            "finishedAt": null
        }
    })
}

#[tokio::test]
async fn start_run_posts_input_to_tilde_actor_path() {
    let server = MockServer::start().await;

    let input = LinkedInProfileInput {
        profile_urls: vec!["https://linkedin.com/in/jdoe".to_string()],
        start_urls: vec![StartUrl {
            url: "https://linkedin.com/in/jdoe".to_string(),
        }],
    };

    Mock::given(method("POST"))
        .and(path("/acts/dev_fusion~Linkedin-Profile-Scraper/runs"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "profileUrls": ["https://linkedin.com/in/jdoe"],
            "startUrls": [{"url": "https://linkedin.com/in/jdoe"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_json("READY")))
        .expect(1)
        .mount(&server)
        .await;

    let run = test_client(&server)
        .start_run("dev_fusion/Linkedin-Profile-Scraper", &input)
        .await
        .expect("start_run should succeed");

    assert_eq!(run.id, "run-123");
    assert_eq!(run.default_dataset_id, "ds-456");
    assert_eq!(run.status, ActorRunStatus::Ready);
}

#[tokio::test]
async fn get_run_reports_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actor-runs/run-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "run-123",
                "status": "FAILED",
                "statusMessage": "Login wall",
                "defaultDatasetId": "ds-456"
            }
        })))
        .mount(&server)
        .await;

    let run = test_client(&server).get_run("run-123").await.unwrap();

    assert_eq!(run.status, ActorRunStatus::Failed);
    assert_eq!(run.status_message.as_deref(), Some("Login wall"));
}

#[tokio::test]
async fn finished_run_carries_its_timestamps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actor-runs/run-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "run-123",
                "status": "SUCCEEDED",
                "defaultDatasetId": "ds-456",
                "startedAt": "2024-05-01T10:00:00.000Z",
                "finishedAt": "2024-05-01T10:00:42.000Z"
            }
        })))
        .mount(&server)
        .await;

    let run = test_client(&server).get_run("run-123").await.unwrap();

    assert!(run.status.is_terminal());
    assert_eq!(run.duration().map(|d| d.num_seconds()), Some(42));
}

#[tokio::test]
async fn dataset_items_are_returned_as_raw_values() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasets/ds-456/items"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"fullName": "Jane Doe"},
            {"fullName": "John Roe"}
        ])))
        .mount(&server)
        .await;

    let items: Vec<serde_json::Value> = test_client(&server)
        .get_dataset_items("ds-456")
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["fullName"], "Jane Doe");
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/acts/2SyF0bVxmgGr8IVCZ/runs"))
        .respond_with(ResponseTemplate::new(402).set_body_string("not enough credits"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .start_run("2SyF0bVxmgGr8IVCZ", &json!({}))
        .await
        .unwrap_err();

    match &err {
        ApifyError::Api { status, message } => {
            assert_eq!(*status, 402);
            assert_eq!(message, "not enough credits");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
