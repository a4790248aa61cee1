use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use frases::auth::AccessGate;
use frases::model::Quote;
use frases::queue::SubmissionQueue;
use frases::server;
use frases::state::AppState;
use frases::store::QuoteStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

const TOKEN: &str = "ci-token";

fn quote(text: &str, author: Option<&str>, category: &str) -> Quote {
    serde_json::from_value(json!({
        "text": text,
        "author": author,
        "category": category,
    }))
    .unwrap()
}

fn sample_quotes() -> Vec<Quote> {
    vec![
        quote("La vida es sueño", Some("Calderón"), "philosophy"),
        quote("Caminante, no hay camino", Some("Machado"), "life"),
        quote("Donde una puerta se cierra, otra se abre", Some("Cervantes"), "motivation"),
        quote("Proverbio sin dueño", None, "other"),
    ]
}

fn test_app(quotes: Vec<Quote>) -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let state = AppState {
        store: QuoteStore::new(quotes).unwrap(),
        queue: SubmissionQueue::new(dir.path().join("pending_submissions.json")),
        gate: AccessGate::new(vec![TOKEN.to_string()]).unwrap(),
    };
    (dir, server::app(Arc::new(state)))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_submit(app: &Router, token: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/submit")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_quote_count() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn test_random_returns_a_known_quote() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/random").await;

    assert_eq!(status, StatusCode::OK);
    let texts: Vec<String> = sample_quotes().iter().map(|q| q.text.clone()).collect();
    assert!(texts.contains(&body["text"].as_str().unwrap().to_string()));
}

#[tokio::test]
async fn test_random_with_category_filter() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/random?category=life").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "life");
}

#[tokio::test]
async fn test_random_is_not_found_when_pool_is_empty() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, _) = get(&app, "/random?category=no-such-category").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_dir, app) = test_app(Vec::new());
    let (status, _) = get(&app, "/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_lookup_is_case_insensitive() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, upper) = get(&app, "/author/MACHADO").await;
    assert_eq!(status, StatusCode::OK);
    let (_, lower) = get(&app, "/author/machado").await;

    assert_eq!(upper, lower);
    assert_eq!(upper.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_author_is_an_empty_list_not_an_error() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/author/Nonexistent").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_rejects_out_of_range_queries() {
    let (_dir, app) = test_app(sample_quotes());

    let (status, _) = get(&app, "/search?q=a").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(&app, "/search").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = get(&app, "/search?q=ab").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_search_finds_substring_matches() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/search?q=camino").await;

    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["author"], "Machado");
}

#[tokio::test]
async fn test_categories_are_sorted_and_distinct() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["life", "motivation", "other", "philosophy"]));
}

#[tokio::test]
async fn test_stats_shape() {
    let (_dir, app) = test_app(sample_quotes());
    let (status, body) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_quotes"], 4);
    assert_eq!(body["unique_authors"], 3);
    assert_eq!(body["unique_categories"], 4);
}

#[tokio::test]
async fn test_submit_with_valid_token_queues_the_entry() {
    let (dir, app) = test_app(sample_quotes());
    let payload = r#"{"text": "Nueva frase", "author": "Tester", "category": "pruebas"}"#;
    let (status, body) = post_submit(&app, Some(TOKEN), payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["pending_count"], 1);

    // The entry actually reached the persisted queue
    let queue = SubmissionQueue::new(dir.path().join("pending_submissions.json"));
    let entries = queue.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Nueva frase");
    assert_eq!(entries[0].author, "Tester");
}

#[tokio::test]
async fn test_submit_with_wrong_token_is_unauthorized() {
    let (_dir, app) = test_app(sample_quotes());
    let payload = r#"{"text": "Nueva frase"}"#;

    let (status, _) = post_submit(&app, Some("malo"), payload).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_submit(&app, None, payload).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submit_auth_runs_before_payload_parsing() {
    let (_dir, app) = test_app(sample_quotes());

    // Garbage payload with a bad credential: the credential decides
    let (status, _) = post_submit(&app, Some("malo"), "not json at all").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_submit(&app, Some(TOKEN), "not json at all").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_submit_rejects_empty_text() {
    let (dir, app) = test_app(sample_quotes());
    let (status, _) = post_submit(&app, Some(TOKEN), r#"{"text": "   "}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was queued
    let queue = SubmissionQueue::new(dir.path().join("pending_submissions.json"));
    assert_eq!(queue.len().unwrap(), 0);
}

#[tokio::test]
async fn test_submissions_accumulate_in_order() {
    let (_dir, app) = test_app(sample_quotes());

    for i in 1..=3 {
        let payload = format!(r#"{{"text": "frase {}"}}"#, i);
        let (status, body) = post_submit(&app, Some(TOKEN), &payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pending_count"], i);
    }
}
