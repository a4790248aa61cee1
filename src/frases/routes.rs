use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::{FrasesError, Result};
use crate::model::{NewSubmission, Quote};
use crate::state::AppState;
use crate::store::StoreStats;

#[derive(Deserialize)]
pub struct RandomParams {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub id: Uuid,
    pub status: &'static str,
    pub pending_count: usize,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "count": state.store.len() }))
}

pub async fn random_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RandomParams>,
) -> Result<Json<Quote>> {
    let quote = state.store.random(params.category.as_deref())?;
    Ok(Json(quote.clone()))
}

pub async fn author_handler(
    State(state): State<Arc<AppState>>,
    Path(author): Path<String>,
) -> Json<Vec<Quote>> {
    let quotes = state
        .store
        .by_author(&author)
        .into_iter()
        .cloned()
        .collect();
    Json(quotes)
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Quote>>> {
    let query = params
        .q
        .ok_or_else(|| FrasesError::Validation("missing query parameter q".into()))?;
    let quotes = state.store.search(&query)?.into_iter().cloned().collect();
    Ok(Json(quotes))
}

pub async fn categories_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.store.categories())
}

pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    Json(state.store.stats())
}

/// The only write path. The gate runs before the body is even parsed, so a
/// bad credential is a 401 no matter what the payload looks like.
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>> {
    let credential = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    state.gate.authorize(credential)?;

    let submission: NewSubmission = serde_json::from_slice(&body)
        .map_err(|e| FrasesError::Validation(format!("malformed submission: {}", e)))?;
    let submission = submission.validated()?;

    let receipt = state.queue.append(submission)?;
    info!(id = %receipt.id, pending = receipt.pending, "submission queued");

    Ok(Json(SubmitResponse {
        id: receipt.id,
        status: "pending",
        pending_count: receipt.pending,
    }))
}
