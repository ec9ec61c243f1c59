use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::services::analytics::AnalyticsEventType;
use crate::services::coupons;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/offers", get(list_offers))
        .route("/offers/apply", post(apply_coupon))
}

// GET /api/offers
async fn list_offers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "offers": state.offers.all(),
            "count": state.offers.all().len(),
        })),
    )
}

// POST /api/offers/apply
//
// Evaluates a coupon against a live booking session. Rejections are part of
// the normal response shape (is_valid=false), not HTTP errors.
#[derive(Debug, Deserialize)]
struct ApplyCouponRequest {
    code: String,
    booking_id: Uuid,
}

async fn apply_coupon(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApplyCouponRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.code.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "code must not be empty".to_string()));
    }

    let (total, count, category) = state
        .sessions
        .with_session(req.booking_id, |s| {
            (
                s.tracker.total(),
                s.tracker.ticket_count() as u32,
                s.category,
            )
        })
        .await
        .ok_or((StatusCode::NOT_FOUND, "Booking session not found".to_string()))?;

    let outcome = coupons::evaluate(
        &state.offers,
        &req.code,
        total,
        Some(category),
        Some(count),
        chrono::Utc::now(),
    );

    state.analytics.lock().await.record_now(
        AnalyticsEventType::FormSubmit,
        "coupon-apply",
        "/book-movie",
        json!({
            "code": req.code,
            "isValid": outcome.is_valid,
            "discount": outcome.discount,
            "totalAmount": total,
        }),
    );

    Ok((StatusCode::OK, Json(outcome)))
}
