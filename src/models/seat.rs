use serde::{Deserialize, Serialize};

use crate::money::Paise;

/// Seating tier, fixed per row position at map generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    Regular,
    Premium,
    Executive,
}

/// Price table per tier, supplied by the caller when a map is generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierPrices {
    pub regular: Paise,
    pub premium: Paise,
    pub executive: Paise,
}

impl TierPrices {
    pub fn for_tier(&self, tier: SeatTier) -> Paise {
        match tier {
            SeatTier::Regular => self.regular,
            SeatTier::Premium => self.premium,
            SeatTier::Executive => self.executive,
        }
    }
}

/// One seat in a generated map. `tier`, `price` and `occupied` are fixed at
/// generation; `selected` is derived from the current selection set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub tier: SeatTier,
    pub price: Paise,
    pub occupied: bool,
    pub selected: bool,
}
