//! Static offer catalog.
//!
//! Offers are read-only reference data loaded once at startup. Validity
//! windows are relative to the seed date so the demo records never expire
//! while a deployment is running.

use chrono::{Duration, NaiveDate};

use crate::models::{Category, Offer};
use crate::money::rupees;

#[derive(Debug, Clone)]
pub struct OfferCatalog {
    offers: Vec<Offer>,
}

impl OfferCatalog {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    /// The storefront's stock promotions, valid relative to `today`.
    pub fn demo(today: NaiveDate) -> Self {
        Self::new(vec![
            Offer {
                id: "o1".into(),
                title: "Movie Monday Madness".into(),
                description: "Get 25% off on all movie tickets every Monday".into(),
                discount: "25% OFF".into(),
                valid_until: today + Duration::days(365),
                category: Category::Movies,
                code: "MONDAY25".into(),
                max_discount: Some(rupees(100)),
                min_amount: None,
                terms: vec![
                    "Valid only on Mondays".into(),
                    "Maximum discount of ₹100".into(),
                    "Valid on all movie tickets".into(),
                    "Cannot be combined with other offers".into(),
                ],
            },
            Offer {
                id: "o2".into(),
                title: "First Booking Special".into(),
                description: "Flat ₹100 off on your first booking".into(),
                discount: "₹100 OFF".into(),
                valid_until: today + Duration::days(180),
                category: Category::All,
                code: "FIRST100".into(),
                max_discount: None,
                min_amount: Some(rupees(300)),
                terms: vec![
                    "Valid for new users only".into(),
                    "Minimum booking amount ₹300".into(),
                    "Valid on all categories".into(),
                    "One time use only".into(),
                ],
            },
            Offer {
                id: "o3".into(),
                title: "Weekend Event Bonanza".into(),
                description: "Buy 2 get 1 free on event tickets".into(),
                discount: "Buy 2 Get 1 Free".into(),
                valid_until: today + Duration::days(90),
                category: Category::Events,
                code: "WEEKEND3".into(),
                max_discount: None,
                min_amount: None,
                terms: vec![
                    "Valid on weekends only".into(),
                    "Applicable on same event only".into(),
                    "Lowest priced ticket will be free".into(),
                    "Valid on selected events".into(),
                ],
            },
        ])
    }

    /// Case-insensitive code lookup.
    pub fn find(&self, code: &str) -> Option<&Offer> {
        self.offers
            .iter()
            .find(|o| o.code.eq_ignore_ascii_case(code))
    }

    pub fn all(&self) -> &[Offer] {
        &self.offers
    }
}
