//! analytics.rs
//!
//! Inspection and ingestion endpoints for the interaction log.
//!
//! Covers:
//! - Recording client-submitted events (page clicks, navigation, searches).
//! - A summary view: per-type counts plus the retained event tail.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::services::analytics::AnalyticsEvent;
use crate::AppState;

/// Routes related to analytics.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics", get(get_analytics))
        .route("/analytics/log", post(log_event))
}

// POST /api/analytics/log
async fn log_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<AnalyticsEvent>,
) -> impl IntoResponse {
    state.analytics.lock().await.record(event);
    (StatusCode::ACCEPTED, Json(serde_json::json!({"status": "logged"})))
}

// GET /api/analytics
#[derive(Debug, Serialize)]
struct AnalyticsResponse {
    total_events: usize,
    counts_by_type: HashMap<String, usize>,
    events: Vec<AnalyticsEvent>,
}

async fn get_analytics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let log = state.analytics.lock().await;
    let response = AnalyticsResponse {
        total_events: log.len(),
        counts_by_type: log.counts_by_type(),
        events: log.events(),
    };
    (StatusCode::OK, Json(response))
}
