//! seatmap.rs
//!
//! Deterministic seat-map generation for a rectangular auditorium.
//!
//! A map is built once per booking session from row/column counts, an
//! occupied-seat list and a tier price table. Everything about a seat is
//! fixed at generation time; only the derived `selected` flag changes later.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Seat, SeatTier, TierPrices};

/// Row labels are single letters, so a map holds at most 26 rows.
pub const MAX_ROWS: u32 = 26;

const ROW_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("seat map dimensions must be 1..=26 rows and at least 1 seat per row (got {rows}x{seats_per_row})")]
    InvalidDimensions { rows: u32, seats_per_row: u32 },
}

/// Tier of a seat, a pure function of its row index and the row count.
///
/// The regular check runs first: for small maps (rows <= 5) the first-three
/// and last-two bands overlap and premium is starved, never regular.
pub fn tier_for_row(row: u32, rows: u32) -> SeatTier {
    if row < 3 {
        SeatTier::Regular
    } else if row >= rows.saturating_sub(2) {
        SeatTier::Executive
    } else {
        SeatTier::Premium
    }
}

// Seat-count math happens in usize; multiplying the raw u32 counts can
// overflow for wide maps.
fn map_capacity(rows: u32, seats_per_row: u32) -> usize {
    rows as usize * seats_per_row as usize
}

/// Build a seat map in row-major order: all of row A, then row B, and so on.
/// Seat ids are `{RowLetter}{ColumnNumber}` with columns numbered from 1.
pub fn generate(
    rows: u32,
    seats_per_row: u32,
    occupied_ids: &HashSet<String>,
    prices: &TierPrices,
) -> Result<Vec<Seat>, SeatMapError> {
    if rows == 0 || seats_per_row == 0 || rows > MAX_ROWS {
        return Err(SeatMapError::InvalidDimensions { rows, seats_per_row });
    }

    let mut seats = Vec::with_capacity(map_capacity(rows, seats_per_row));
    for row in 0..rows {
        let label = ROW_LABELS[row as usize] as char;
        let tier = tier_for_row(row, rows);
        for number in 1..=seats_per_row {
            let id = format!("{label}{number}");
            let occupied = occupied_ids.contains(&id);
            seats.push(Seat {
                id,
                tier,
                price: prices.for_tier(tier),
                occupied,
                selected: false,
            });
        }
    }
    Ok(seats)
}
