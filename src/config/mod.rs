use serde::Deserialize;
use std::env;

use crate::money::{rupees, Paise};

// Top-level configuration container for all settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub venue: VenueConfig,
    pub analytics: AnalyticsConfig,
    pub features: FeatureFlags,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Default auditorium layout used when a booking session does not override it.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
    pub rows: u32,
    pub seats_per_row: u32,
    /// Demo occupancy list, comma-separated seat ids.
    pub occupied_seats: Vec<String>,
    pub regular_price: Paise,
    pub premium_price: Paise,
    pub executive_price: Paise,
}

// Analytics log settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    pub capacity: usize,
}

// Feature flags
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_auth: bool,
    pub enable_analytics: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "booksmart=debug,tower_http=debug".to_string()),
            },
            venue: VenueConfig {
                rows: env::var("VENUE_ROWS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("VENUE_ROWS must be a valid number"),
                seats_per_row: env::var("VENUE_SEATS_PER_ROW")
                    .unwrap_or_else(|_| "16".to_string())
                    .parse()
                    .expect("VENUE_SEATS_PER_ROW must be a valid number"),
                occupied_seats: env::var("VENUE_OCCUPIED_SEATS")
                    .unwrap_or_else(|_| "A1,A2,B5,C10,D8,E3,E4,F15,G7".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                regular_price: price_from_env("VENUE_REGULAR_PRICE", 200),
                premium_price: price_from_env("VENUE_PREMIUM_PRICE", 350),
                executive_price: price_from_env("VENUE_EXECUTIVE_PRICE", 500),
            },
            analytics: AnalyticsConfig {
                capacity: env::var("ANALYTICS_CAPACITY")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("ANALYTICS_CAPACITY must be a valid number"),
            },
            features: FeatureFlags {
                enable_auth: env::var("ENABLE_AUTH")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_AUTH must be true or false"),
                enable_analytics: env::var("ENABLE_ANALYTICS")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_ANALYTICS must be true or false"),
            },
        }
    }
}

// Prices are configured in whole rupees and converted to paise here.
fn price_from_env(key: &str, default_rupees: i64) -> Paise {
    let value: i64 = env::var(key)
        .unwrap_or_else(|_| default_rupees.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{key} must be a valid number"));
    rupees(value)
}
