pub mod analytics;
pub mod coupons;
pub mod seatmap;
pub mod selection;
