pub mod offer;
pub mod seat;
pub mod user;

pub use offer::{Category, Offer};
pub use seat::{Seat, SeatTier, TierPrices};
pub use user::AuthUser;
