//! selection.rs
//!
//! Tracks the seats a user has picked inside one booking session.
//!
//! The tracker owns the generated map and an ordered set of selected seat
//! ids, capped at [`MAX_SEATS_PER_BOOKING`]. The running total is recomputed
//! from scratch on every toggle, so it can never drift from the selection.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::Seat;
use crate::money::Paise;

/// Hard cap on seats per booking.
pub const MAX_SEATS_PER_BOOKING: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The id does not exist in the generated map. Indicates a caller bug.
    #[error("unknown seat id '{0}'")]
    UnknownSeat(String),
    /// The seat was occupied at generation time and can never be selected.
    #[error("seat '{0}' is already occupied")]
    SeatOccupied(String),
    /// Selecting would exceed the per-booking cap; state is unchanged.
    #[error("you can select maximum {MAX_SEATS_PER_BOOKING} seats")]
    CapExceeded,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Selected,
    Deselected,
}

/// Result of a successful toggle: the new selection (in pick order) and the
/// recomputed total.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    pub selected: Vec<String>,
    pub total: Paise,
}

/// Stateful selection over one generated seat map. Single-actor and
/// synchronous; one session owns one tracker.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    seats: Vec<Seat>,
    // id -> index into `seats`, for O(1) toggles.
    index: HashMap<String, usize>,
    selected: Vec<String>,
}

impl SelectionTracker {
    pub fn new(seats: Vec<Seat>) -> Self {
        let index = seats
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self {
            seats,
            index,
            selected: Vec::new(),
        }
    }

    /// Select or deselect a seat, recomputing the total before returning.
    pub fn toggle(&mut self, seat_id: &str) -> Result<ToggleOutcome, SelectionError> {
        let idx = *self
            .index
            .get(seat_id)
            .ok_or_else(|| SelectionError::UnknownSeat(seat_id.to_string()))?;
        if self.seats[idx].occupied {
            return Err(SelectionError::SeatOccupied(seat_id.to_string()));
        }

        let action = if let Some(pos) = self.selected.iter().position(|id| id == seat_id) {
            self.selected.remove(pos);
            ToggleAction::Deselected
        } else {
            if self.selected.len() >= MAX_SEATS_PER_BOOKING {
                return Err(SelectionError::CapExceeded);
            }
            self.selected.push(seat_id.to_string());
            ToggleAction::Selected
        };

        Ok(ToggleOutcome {
            action,
            selected: self.selected.clone(),
            total: self.total(),
        })
    }

    /// Sum of generation-time prices over the current selection.
    pub fn total(&self) -> Paise {
        self.selected
            .iter()
            .map(|id| self.seats[self.index[id]].price)
            .sum()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn ticket_count(&self) -> usize {
        self.selected.len()
    }

    /// The map with the derived `selected` flag filled in, for rendering.
    pub fn seats(&self) -> Vec<Seat> {
        self.seats
            .iter()
            .map(|s| {
                let mut seat = s.clone();
                seat.selected = self.selected.iter().any(|id| id == &seat.id);
                seat
            })
            .collect()
    }

    /// Drop the whole selection (booking flow restarted or completed).
    pub fn reset(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::rupees;
    use crate::models::TierPrices;
    use crate::services::seatmap;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn tracker_with(occupied: &[&str]) -> SelectionTracker {
        let occupied: HashSet<String> = occupied.iter().map(|s| s.to_string()).collect();
        let prices = TierPrices {
            regular: rupees(200),
            premium: rupees(350),
            executive: rupees(500),
        };
        SelectionTracker::new(seatmap::generate(10, 16, &occupied, &prices).unwrap())
    }

    #[test]
    fn select_then_deselect_restores_prior_state() {
        let mut tracker = tracker_with(&[]);
        let _ = tracker.toggle("D5").unwrap();
        let before_total = tracker.total();
        let before_selected = tracker.selected().to_vec();

        tracker.toggle("F12").unwrap();
        let out = tracker.toggle("F12").unwrap();
        assert_eq!(out.action, ToggleAction::Deselected);
        assert_eq!(out.selected, before_selected);
        assert_eq!(out.total, before_total);
    }

    #[test]
    fn total_is_sum_of_selected_tier_prices() {
        let mut tracker = tracker_with(&[]);
        tracker.toggle("A1").unwrap(); // regular 200
        tracker.toggle("D2").unwrap(); // premium 350
        let out = tracker.toggle("J3").unwrap(); // executive 500
        assert_eq!(out.total, rupees(1050));
        assert_eq!(out.selected, vec!["A1", "D2", "J3"]);
    }

    #[test]
    fn occupied_seat_rejected_without_state_change() {
        let mut tracker = tracker_with(&["B5"]);
        tracker.toggle("A1").unwrap();
        let err = tracker.toggle("B5").unwrap_err();
        assert_eq!(err, SelectionError::SeatOccupied("B5".into()));
        assert_eq!(tracker.selected(), ["A1"]);
        assert_eq!(tracker.total(), rupees(200));
    }

    #[test]
    fn unknown_seat_is_an_error() {
        let mut tracker = tracker_with(&[]);
        let err = tracker.toggle("Z99").unwrap_err();
        assert_eq!(err, SelectionError::UnknownSeat("Z99".into()));
    }

    #[test]
    fn ninth_selection_is_rejected_and_set_unchanged() {
        let mut tracker = tracker_with(&[]);
        for n in 1..=8 {
            tracker.toggle(&format!("A{n}")).unwrap();
        }
        let before = tracker.selected().to_vec();
        let err = tracker.toggle("A9").unwrap_err();
        assert_eq!(err, SelectionError::CapExceeded);
        assert_eq!(tracker.selected(), before.as_slice());

        // Deselecting still works at the cap.
        let out = tracker.toggle("A1").unwrap();
        assert_eq!(out.action, ToggleAction::Deselected);
        assert_eq!(out.selected.len(), 7);
    }

    #[test]
    fn seats_view_carries_derived_selected_flag() {
        let mut tracker = tracker_with(&[]);
        tracker.toggle("C3").unwrap();
        let seats = tracker.seats();
        for seat in seats {
            assert_eq!(seat.selected, seat.id == "C3");
        }
    }

    #[test]
    fn reset_empties_the_selection() {
        let mut tracker = tracker_with(&[]);
        tracker.toggle("A1").unwrap();
        tracker.toggle("A2").unwrap();
        tracker.reset();
        assert!(tracker.selected().is_empty());
        assert_eq!(tracker.total(), 0);
    }

    proptest! {
        /// Under any toggle sequence the selection never exceeds the cap and
        /// the total always equals the sum over exactly the selected seats.
        #[test]
        fn cap_and_total_hold_for_any_sequence(
            toggles in proptest::collection::vec((0u32..10, 1u32..=16), 0..60)
        ) {
            let mut tracker = tracker_with(&["A1", "B5", "C10"]);
            for (row, number) in toggles {
                let id = format!("{}{}", (b'A' + row as u8) as char, number);
                let _ = tracker.toggle(&id);
                prop_assert!(tracker.ticket_count() <= MAX_SEATS_PER_BOOKING);

                let expected: Paise = tracker
                    .seats()
                    .iter()
                    .filter(|s| s.selected)
                    .map(|s| s.price)
                    .sum();
                prop_assert_eq!(tracker.total(), expected);
                // Occupied seats never sneak into the selection.
                let picked_occupied = tracker
                    .selected()
                    .iter()
                    .any(|id| matches!(id.as_str(), "A1" | "B5" | "C10"));
                prop_assert!(!picked_occupied);
            }
        }
    }
}
