pub mod auth;
pub mod catalog;
pub mod config;
pub mod controllers;
pub mod middleware;
pub mod models;
pub mod money;
pub mod services;
pub mod sessions;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::{Authenticator, DemoAuthenticator, DemoUser};
use catalog::OfferCatalog;
use models::AuthUser;
use services::analytics::AnalyticsLog;
use sessions::SessionStore;

// Shared state for the whole application
pub struct AppState {
    pub config: config::Config,
    pub sessions: SessionStore,
    pub offers: OfferCatalog,
    pub analytics: Mutex<AnalyticsLog>,
    pub authenticator: Box<dyn Authenticator>,
    pub default_identity: AuthUser,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let offers = OfferCatalog::demo(chrono::Utc::now().date_naive());
        let analytics = Mutex::new(AnalyticsLog::new(
            config.analytics.capacity,
            config.features.enable_analytics,
        ));

        let demo_user = DemoUser {
            email: "john.doe@example.com".to_string(),
            password: "password123".to_string(),
            name: "John Doe".to_string(),
            city: "Mumbai".to_string(),
        };
        let default_identity = AuthUser {
            email: demo_user.email.clone(),
            name: demo_user.name.clone(),
            city: demo_user.city.clone(),
        };
        let authenticator = Box::new(DemoAuthenticator::new(vec![demo_user]));

        Arc::new(Self {
            config,
            sessions: SessionStore::new(),
            offers,
            analytics,
            authenticator,
            default_identity,
        })
    }
}

/// Build the application router. Shared between `main` and the integration
/// tests, which drive it in-process.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "BookSmart API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
