//! HTTP routes: the form page, health check, and the two analysis
//! endpoints.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use aern_client::JamClient;
use aern_core::TableSet;

use crate::page;
use crate::submission::{self, Failure};

/// Shared read-only state: the remote client and table targets, created
/// once at startup.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<JamClient>,
    pub tables: Arc<TableSet>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health))
        .route("/api/analyze/single", post(analyze_single))
        .route("/api/analyze/fusion", post(analyze_fusion))
        // Audio clips routinely exceed axum's 2 MB default body limit.
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/analyze/single — exactly one modality.
async fn analyze_single(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match submission::read_form(multipart).await {
        Ok(form) => form,
        Err(failure) => return failure_response(failure),
    };
    match submission::analyze_single(&state.client, &state.tables, form).await {
        Ok(report) => Json(report).into_response(),
        Err(failure) => failure_response(failure),
    }
}

/// POST /api/analyze/fusion — any non-empty subset of modalities.
async fn analyze_fusion(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match submission::read_form(multipart).await {
        Ok(form) => form,
        Err(failure) => return failure_response(failure),
    };
    match submission::analyze_fusion(&state.client, &state.tables, form).await {
        Ok(report) => Json(report).into_response(),
        Err(failure) => failure_response(failure),
    }
}

fn failure_response(failure: Failure) -> Response {
    let status = failure.status;
    (
        status,
        Json(json!({
            "error": failure.error,
            "warnings": failure.warnings,
        })),
    )
        .into_response()
}
