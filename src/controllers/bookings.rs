use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::models::{Category, Seat, TierPrices};
use crate::money::{format_inr, Paise};
use crate::services::analytics::AnalyticsEventType;
use crate::services::coupons;
use crate::services::seatmap;
use crate::services::selection::{SelectionError, SelectionTracker};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/reset", patch(reset_selection))
        .route("/bookings/confirm", post(confirm_booking))
        .route("/seats", get(get_seats))
        .route("/seats/toggle", patch(toggle_seat))
}

pub fn reset_route() -> Router<Arc<AppState>> {
    Router::new().route("/reset", post(reset_all_test_data))
}

/* ---------- helpers ---------- */

fn map_selection_error(err: SelectionError) -> (StatusCode, String) {
    let status = match err {
        SelectionError::UnknownSeat(_) => StatusCode::NOT_FOUND,
        SelectionError::SeatOccupied(_) | SelectionError::CapExceeded => StatusCode::CONFLICT,
    };
    (status, err.to_string())
}

fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Booking session not found".to_string())
}

/* ---------- BOOKINGS ---------- */

// POST /api/bookings
#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    rows: Option<u32>,
    seats_per_row: Option<u32>,
    occupied_seats: Option<Vec<String>>,
    prices: Option<TierPrices>,
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    id: Uuid,
    category: Category,
    seats: Vec<Seat>,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let venue = &state.config.venue;
    let rows = req.rows.unwrap_or(venue.rows);
    let seats_per_row = req.seats_per_row.unwrap_or(venue.seats_per_row);
    let occupied: HashSet<String> = req
        .occupied_seats
        .unwrap_or_else(|| venue.occupied_seats.clone())
        .into_iter()
        .collect();
    let prices = req.prices.unwrap_or(TierPrices {
        regular: venue.regular_price,
        premium: venue.premium_price,
        executive: venue.executive_price,
    });
    let category = match req.category.as_deref() {
        Some(s) => Category::parse(s)
            .ok_or((StatusCode::BAD_REQUEST, format!("Unknown category '{s}'")))?,
        None => Category::Movies,
    };

    let seats = seatmap::generate(rows, seats_per_row, &occupied, &prices)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let tracker = SelectionTracker::new(seats);
    let seats = tracker.seats();
    let id = state.sessions.insert(tracker, category).await;

    tracing::info!("created booking session {} for {} ({}x{})", id, user.email, rows, seats_per_row);

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse { id, category, seats }),
    ))
}

// GET /api/seats?booking_id=...
#[derive(Debug, Deserialize)]
struct SeatsQuery {
    booking_id: Uuid,
}

#[derive(Debug, Serialize)]
struct SeatsResponse {
    seats: Vec<Seat>,
    selected: Vec<String>,
    total: Paise,
}

async fn get_seats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeatsQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let resp = state
        .sessions
        .with_session(params.booking_id, |s| SeatsResponse {
            seats: s.tracker.seats(),
            selected: s.tracker.selected().to_vec(),
            total: s.tracker.total(),
        })
        .await
        .ok_or_else(session_not_found)?;

    Ok((StatusCode::OK, Json(resp)))
}

// PATCH /api/seats/toggle
#[derive(Debug, Deserialize)]
struct ToggleSeatRequest {
    booking_id: Uuid,
    seat_id: String,
}

async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ToggleSeatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.seat_id.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "seat_id must not be empty".to_string()));
    }

    let result = state
        .sessions
        .with_session(req.booking_id, |s| s.tracker.toggle(&req.seat_id))
        .await
        .ok_or_else(session_not_found)?;

    let outcome = result.map_err(map_selection_error)?;

    state.analytics.lock().await.record_now(
        AnalyticsEventType::Click,
        "seat-selection",
        "/book-movie",
        json!({
            "seatId": req.seat_id,
            "action": outcome.action,
            "totalSeats": outcome.selected.len(),
            "totalPrice": outcome.total,
            "user": user.email,
        }),
    );

    Ok((StatusCode::OK, Json(outcome)))
}

// PATCH /api/bookings/reset
#[derive(Debug, Deserialize)]
struct ResetSelectionRequest {
    booking_id: Uuid,
}

async fn reset_selection(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(req): Json<ResetSelectionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .sessions
        .with_session(req.booking_id, |s| s.tracker.reset())
        .await
        .ok_or_else(session_not_found)?;

    Ok((StatusCode::OK, Json(json!({"message": "Selection cleared"}))))
}

// POST /api/bookings/confirm
#[derive(Debug, Deserialize)]
struct ConfirmBookingRequest {
    booking_id: Uuid,
    coupon_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConfirmBookingResponse {
    booking_id: Uuid,
    seats: Vec<String>,
    total: Paise,
    discount: Paise,
    payable: Paise,
    total_display: String,
    payable_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_message: Option<String>,
}

async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Peek at the session first; the coupon is re-evaluated against the live
    // total so a stale client-side discount cannot stick.
    let (seats, total, count, category) = state
        .sessions
        .with_session(req.booking_id, |s| {
            (
                s.tracker.selected().to_vec(),
                s.tracker.total(),
                s.tracker.ticket_count() as u32,
                s.category,
            )
        })
        .await
        .ok_or_else(session_not_found)?;

    if seats.is_empty() {
        return Err((StatusCode::CONFLICT, "No seats selected".to_string()));
    }

    let (discount, coupon_message) = match req.coupon_code.as_deref() {
        Some(code) => {
            let outcome = coupons::evaluate(
                &state.offers,
                code,
                total,
                Some(category),
                Some(count),
                chrono::Utc::now(),
            );
            if !outcome.is_valid {
                return Err((StatusCode::CONFLICT, outcome.message));
            }
            (outcome.discount, Some(outcome.message))
        }
        None => (0, None),
    };

    // Session is consumed on confirmation.
    state
        .sessions
        .remove(req.booking_id)
        .await
        .ok_or_else(session_not_found)?;

    let payable = total - discount;

    state.analytics.lock().await.record_now(
        AnalyticsEventType::Booking,
        "booking-confirm",
        "/book-movie",
        json!({
            "bookingId": req.booking_id,
            "seats": seats,
            "totalPrice": total,
            "discount": discount,
            "user": user.email,
        }),
    );

    tracing::info!(
        "booking {} confirmed: {} seats, payable {}",
        req.booking_id,
        seats.len(),
        format_inr(payable)
    );

    Ok((
        StatusCode::OK,
        Json(ConfirmBookingResponse {
            booking_id: req.booking_id,
            seats,
            total,
            discount,
            payable,
            total_display: format_inr(total),
            payable_display: format_inr(payable),
            coupon_message,
        }),
    ))
}

// POST /api/reset - drop all test data
async fn reset_all_test_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::warn!("RESET: dropping all booking sessions and analytics events");

    let sessions_dropped = state.sessions.clear().await;
    let mut analytics = state.analytics.lock().await;
    let events_dropped = analytics.len();
    analytics.clear();

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "All test data cleared",
            "details": {
                "sessions_dropped": sessions_dropped,
                "analytics_events_dropped": events_dropped,
            },
            "preserved": {
                "offers": "static catalog untouched",
            }
        })),
    ))
}
