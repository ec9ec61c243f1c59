use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Paise;

/// Domain category an offer applies to. `All` is the wildcard sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Movies,
    Events,
    Plays,
    Sports,
    Activities,
    All,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "movies" => Some(Category::Movies),
            "events" => Some(Category::Events),
            "plays" => Some(Category::Plays),
            "sports" => Some(Category::Sports),
            "activities" => Some(Category::Activities),
            "all" => Some(Category::All),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Movies => "Movies",
            Category::Events => "Events",
            Category::Plays => "Plays",
            Category::Sports => "Sports",
            Category::Activities => "Activities",
            Category::All => "All",
        };
        f.write_str(s)
    }
}

/// A promotional offer. The discount shape is carried as display text
/// (`"25% OFF"`, `"₹100 OFF"`, `"Buy 2 Get 1 Free"`) and parsed by the
/// evaluator; caps and floors live on the record itself so the offer table
/// is the single source of truth for every rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    pub discount: String,
    pub valid_until: NaiveDate,
    pub category: Category,
    pub code: String,
    /// Cap on the computed discount (percentage offers).
    pub max_discount: Option<Paise>,
    /// Minimum booking amount required to apply the offer (fixed offers).
    pub min_amount: Option<Paise>,
    pub terms: Vec<String>,
}
