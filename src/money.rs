//! Monetary amounts as integer paise (₹1 = 100 paise).
//!
//! All arithmetic in the booking core happens in minor units; rupee
//! formatting exists only for user-facing messages and response payloads.

/// Amount in paise.
pub type Paise = i64;

/// Convert whole rupees to paise. Config and catalog values are entered
/// in rupees; everything downstream works in paise.
pub const fn rupees(amount: i64) -> Paise {
    amount * 100
}

/// Format an amount as `₹123.45` (always two decimals, matching the
/// storefront's display convention).
pub fn format_inr(amount: Paise) -> String {
    format!("₹{}.{:02}", amount / 100, (amount % 100).abs())
}

/// Format an amount as whole rupees, `₹300`, for thresholds that are
/// always round figures (minimum-amount rules).
pub fn format_inr_whole(amount: Paise) -> String {
    format!("₹{}", amount / 100)
}
