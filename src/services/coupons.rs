//! coupons.rs
//!
//! Coupon evaluation for the booking flow.
//!
//! The evaluator is a pure function over the offer table: code lookup,
//! expiry and category gates, then one of three discount shapes
//! (percentage, fixed amount, buy-2-get-1). Rejections are ordinary return
//! values with a user-facing message, never errors.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::OfferCatalog;
use crate::models::{Category, Offer};
use crate::money::{format_inr, format_inr_whole, Paise};

/// How a coupon's discount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
    Buy2Get1,
}

/// Verdict of a coupon evaluation. `discount` is zero whenever
/// `is_valid` is false.
#[derive(Debug, Clone, Serialize)]
pub struct CouponOutcome {
    pub is_valid: bool,
    pub discount: Paise,
    pub discount_type: DiscountType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CouponOutcome {
    fn rejected(discount_type: DiscountType, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            discount: 0,
            discount_type,
            message: message.into(),
            code: None,
        }
    }
}

/// Discount shape parsed from an offer's display text: a literal
/// "buy 2 get 1 free" phrase, a leading integer with `%`, or a leading
/// integer with `₹`.
fn parse_shape(discount_text: &str) -> Option<(DiscountType, i64)> {
    if discount_text.to_lowercase().contains("buy 2 get 1 free") {
        return Some((DiscountType::Buy2Get1, 0));
    }
    let digits: String = discount_text.chars().filter(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().ok()?;
    if discount_text.contains('%') {
        Some((DiscountType::Percentage, value))
    } else if discount_text.contains('₹') {
        Some((DiscountType::Fixed, value))
    } else {
        None
    }
}

/// Evaluate `code` against the offer table for a booking of `total` paise.
///
/// Check order: lookup, expiry, category, shape-specific rules, minimum
/// amount. Each failed gate is terminal. `now` is explicit so expiry is
/// deterministic under test; the HTTP layer passes `Utc::now()`.
pub fn evaluate(
    catalog: &OfferCatalog,
    code: &str,
    total: Paise,
    category: Option<Category>,
    ticket_count: Option<u32>,
    now: DateTime<Utc>,
) -> CouponOutcome {
    let Some(offer) = catalog.find(code) else {
        return CouponOutcome::rejected(DiscountType::Percentage, "Invalid coupon code");
    };

    if now.date_naive() > offer.valid_until {
        return CouponOutcome::rejected(DiscountType::Percentage, "This coupon has expired");
    }

    if offer.category != Category::All {
        if let Some(cat) = category {
            if offer.category != cat {
                return CouponOutcome::rejected(
                    DiscountType::Percentage,
                    format!("This coupon is only valid for {}", offer.category),
                );
            }
        }
    }

    let Some((discount_type, value)) = parse_shape(&offer.discount) else {
        // Unparseable discount text means a broken offer record, not a user
        // mistake; treat it like an unknown code.
        tracing::warn!("offer {} has unparseable discount text '{}'", offer.code, offer.discount);
        return CouponOutcome::rejected(DiscountType::Percentage, "Invalid coupon code");
    };

    let discount = match discount_type {
        DiscountType::Buy2Get1 => {
            let tickets = ticket_count.unwrap_or(0);
            if tickets < 3 {
                return CouponOutcome::rejected(
                    DiscountType::Buy2Get1,
                    "You need at least 3 tickets to use this offer",
                );
            }
            let free_tickets = (tickets / 3) as i64;
            let per_ticket = total / tickets as i64;
            free_tickets * per_ticket
        }
        DiscountType::Percentage => {
            let raw = total * value / 100;
            match offer.max_discount {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
        // Never discount more than the booking total.
        DiscountType::Fixed => crate::money::rupees(value).min(total),
    };

    // The minimum-amount floor gates success even though the discount is
    // already computed at this point.
    if let Some(min_amount) = offer.min_amount {
        if total < min_amount {
            return CouponOutcome::rejected(
                discount_type,
                format!(
                    "Minimum booking amount of {} required",
                    format_inr_whole(min_amount)
                ),
            );
        }
    }

    let message = match discount_type {
        DiscountType::Buy2Get1 => {
            let free_tickets = ticket_count.unwrap_or(0) / 3;
            format!(
                "Buy 2 Get 1 Free applied! You got {} free ticket{} and saved {}",
                free_tickets,
                if free_tickets > 1 { "s" } else { "" },
                format_inr(discount)
            )
        }
        _ => format!("Coupon applied! You saved {}", format_inr(discount)),
    };

    CouponOutcome {
        is_valid: true,
        discount,
        discount_type,
        message,
        code: Some(offer.code.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::rupees;
    use chrono::NaiveDate;

    fn catalog() -> OfferCatalog {
        OfferCatalog::demo(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    fn at() -> DateTime<Utc> {
        "2026-02-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn unknown_code_is_invalid_regardless_of_inputs() {
        let out = evaluate(&catalog(), "NOPE123", rupees(5000), Some(Category::Movies), Some(4), at());
        assert!(!out.is_valid);
        assert_eq!(out.discount, 0);
        assert_eq!(out.message, "Invalid coupon code");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let out = evaluate(&catalog(), "monday25", rupees(400), Some(Category::Movies), None, at());
        assert!(out.is_valid);
        assert_eq!(out.code.as_deref(), Some("MONDAY25"));
    }

    #[test]
    fn percentage_discount_clamped_to_cap() {
        // 25% of ₹1000 would be ₹250; MONDAY25 caps at ₹100.
        let out = evaluate(&catalog(), "MONDAY25", rupees(1000), Some(Category::Movies), None, at());
        assert!(out.is_valid);
        assert_eq!(out.discount_type, DiscountType::Percentage);
        assert_eq!(out.discount, rupees(100));
        assert_eq!(out.message, "Coupon applied! You saved ₹100.00");
    }

    #[test]
    fn percentage_discount_below_cap_uncapped() {
        // 25% of ₹200 = ₹50, under the ₹100 cap.
        let out = evaluate(&catalog(), "MONDAY25", rupees(200), Some(Category::Movies), None, at());
        assert!(out.is_valid);
        assert_eq!(out.discount, rupees(50));
    }

    #[test]
    fn category_mismatch_is_terminal() {
        let out = evaluate(&catalog(), "MONDAY25", rupees(1000), Some(Category::Sports), None, at());
        assert!(!out.is_valid);
        assert_eq!(out.message, "This coupon is only valid for Movies");
    }

    #[test]
    fn all_category_offer_matches_anything() {
        let out = evaluate(&catalog(), "FIRST100", rupees(500), Some(Category::Plays), None, at());
        assert!(out.is_valid);
    }

    #[test]
    fn fixed_discount_gated_by_minimum_amount() {
        let below = evaluate(&catalog(), "FIRST100", rupees(200), None, None, at());
        assert!(!below.is_valid);
        assert_eq!(below.message, "Minimum booking amount of ₹300 required");

        let above = evaluate(&catalog(), "FIRST100", rupees(500), None, None, at());
        assert!(above.is_valid);
        assert_eq!(above.discount_type, DiscountType::Fixed);
        assert_eq!(above.discount, rupees(100));
    }

    #[test]
    fn fixed_discount_never_exceeds_total() {
        // Floor sits at ₹300, so ₹350 passes the gate with only ₹350 to discount.
        let out = evaluate(&catalog(), "FIRST100", rupees(350), None, None, at());
        assert!(out.is_valid);
        assert!(out.discount <= rupees(350));
    }

    #[test]
    fn buy2get1_needs_three_tickets() {
        let out = evaluate(&catalog(), "WEEKEND3", rupees(800), Some(Category::Events), Some(2), at());
        assert!(!out.is_valid);
        assert_eq!(out.message, "You need at least 3 tickets to use this offer");

        let none = evaluate(&catalog(), "WEEKEND3", rupees(800), Some(Category::Events), None, at());
        assert!(!none.is_valid);
    }

    #[test]
    fn buy2get1_worked_example() {
        // 6 tickets at ₹1200 total: 2 free tickets at ₹200 each.
        let out = evaluate(&catalog(), "WEEKEND3", rupees(1200), Some(Category::Events), Some(6), at());
        assert!(out.is_valid);
        assert_eq!(out.discount_type, DiscountType::Buy2Get1);
        assert_eq!(out.discount, rupees(400));
        assert_eq!(
            out.message,
            "Buy 2 Get 1 Free applied! You got 2 free tickets and saved ₹400.00"
        );
    }

    #[test]
    fn buy2get1_single_free_ticket_message() {
        let out = evaluate(&catalog(), "WEEKEND3", rupees(900), Some(Category::Events), Some(3), at());
        assert!(out.is_valid);
        assert_eq!(out.discount, rupees(300));
        assert!(out.message.contains("1 free ticket and"));
    }

    #[test]
    fn expired_coupon_always_rejected() {
        let old_catalog = OfferCatalog::demo(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let out = evaluate(&old_catalog, "MONDAY25", rupees(400), Some(Category::Movies), None, at());
        assert!(!out.is_valid);
        assert_eq!(out.message, "This coupon has expired");
    }

    #[test]
    fn expiry_boundary_day_still_valid() {
        // MONDAY25 in the demo catalog runs 365 days from the seed date.
        let seed = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let last_day: DateTime<Utc> = "2027-01-01T23:00:00Z".parse().unwrap();
        let out = evaluate(
            &OfferCatalog::demo(seed),
            "MONDAY25",
            rupees(400),
            Some(Category::Movies),
            None,
            last_day,
        );
        assert!(out.is_valid);
    }
}
