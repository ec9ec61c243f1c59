pub mod analytics;
pub mod bookings;
pub mod offers;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(bookings::routes())
        .merge(offers::routes())
        .merge(analytics::routes())
        .merge(bookings::reset_route())
}
