//! Status badges and rating stars for the view layer.
//!
//! Every lookup is total: input is trimmed and matched case-insensitively, and
//! anything unrecognized maps to the table's fallback badge.

use serde::Serialize;
use std::fmt;

/// Visual style of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    /// Positive, completed
    Success,
    /// Waiting on someone
    Warning,
    /// Failed or blocked
    Danger,
    /// Informational
    Info,
    /// No particular meaning
    Neutral,
    /// Highlighted
    Primary,
}

impl BadgeVariant {
    /// CSS-ish name of the variant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Neutral => "neutral",
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Badge {
    /// Visual style
    pub variant: BadgeVariant,
    /// Human-readable text
    pub label: &'static str,
}

impl Badge {
    const fn new(variant: BadgeVariant, label: &'static str) -> Self {
        Self { variant, label }
    }
}

type Table = &'static [(&'static str, Badge)];

use BadgeVariant::{Danger, Info, Neutral, Primary, Success, Warning};

const PAYMENT: Table = &[
    ("PAID", Badge::new(Success, "Paid")),
    ("PENDING", Badge::new(Warning, "Pending")),
    ("FAILED", Badge::new(Danger, "Failed")),
    ("REFUNDED", Badge::new(Info, "Refunded")),
    ("CANCELLED", Badge::new(Neutral, "Cancelled")),
];

const REFUND: Table = &[
    ("APPROVED", Badge::new(Success, "Approved")),
    ("REJECTED", Badge::new(Danger, "Rejected")),
    ("PROCESSED", Badge::new(Info, "Processed")),
    ("PENDING", Badge::new(Warning, "Pending Review")),
];

const ORDER: Table = &[
    ("COMPLETED", Badge::new(Success, "Completed")),
    ("DELIVERED", Badge::new(Success, "Delivered")),
    ("PROCESSING", Badge::new(Info, "Processing")),
    ("SHIPPED", Badge::new(Primary, "Shipped")),
    ("PENDING", Badge::new(Warning, "Pending")),
    ("CANCELLED", Badge::new(Danger, "Cancelled")),
];

const BOOKING: Table = &[
    ("CONFIRMED", Badge::new(Success, "Confirmed")),
    ("PENDING", Badge::new(Warning, "Pending")),
    ("CHECKED_IN", Badge::new(Info, "Checked In")),
    ("CANCELLED", Badge::new(Danger, "Cancelled")),
    ("EXPIRED", Badge::new(Neutral, "Expired")),
];

const EVENT: Table = &[
    ("PUBLISHED", Badge::new(Success, "Published")),
    ("DRAFT", Badge::new(Neutral, "Draft")),
    ("SOLD_OUT", Badge::new(Danger, "Sold Out")),
    ("ENDED", Badge::new(Info, "Ended")),
    ("CANCELLED", Badge::new(Danger, "Cancelled")),
];

const LISTING_TYPE: Table = &[
    ("SALE", Badge::new(Primary, "For Sale")),
    ("RENT", Badge::new(Info, "For Rent")),
    ("WANTED", Badge::new(Warning, "Wanted")),
    ("SERVICE", Badge::new(Success, "Service")),
];

fn lookup(table: Table, input: &str, fallback: Badge) -> Badge {
    let key = input.trim();
    table
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(key))
        .map_or(fallback, |(_, badge)| *badge)
}

/// Badge for a payment status
#[must_use]
pub fn payment_status(status: &str) -> Badge {
    lookup(PAYMENT, status, Badge::new(Neutral, "Unknown"))
}

/// Badge for a refund request status. Unknown statuses read as pending review.
#[must_use]
pub fn refund_status(status: &str) -> Badge {
    lookup(REFUND, status, Badge::new(Warning, "Pending Review"))
}

/// Badge for an order status
#[must_use]
pub fn order_status(status: &str) -> Badge {
    lookup(ORDER, status, Badge::new(Neutral, "Unknown"))
}

/// Badge for a booking status
#[must_use]
pub fn booking_status(status: &str) -> Badge {
    lookup(BOOKING, status, Badge::new(Neutral, "Unknown"))
}

/// Badge for an event status. Unknown statuses read as draft.
#[must_use]
pub fn event_status(status: &str) -> Badge {
    lookup(EVENT, status, Badge::new(Neutral, "Draft"))
}

/// Badge for a classified listing type
#[must_use]
pub fn listing_type(kind: &str) -> Badge {
    lookup(LISTING_TYPE, kind, Badge::new(Neutral, "Other"))
}

/// One position in a star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    /// Filled
    Full,
    /// Half filled
    Half,
    /// Outline only
    Empty,
}

/// Number of stars in a rating
pub const MAX_STARS: usize = 5;

/// Render `rating` as five stars.
///
/// `floor(rating)` stars are full, one more is half if the fractional part is
/// at least 0.5, and the rest are empty. Ratings outside `[0, 5]` are clamped;
/// NaN counts as 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, 5] first
pub fn star_rating(rating: f64) -> [Star; MAX_STARS] {
    let rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    };

    let full = rating.floor() as usize;
    let half = full < MAX_STARS && rating - rating.floor() >= 0.5;

    let mut stars = [Star::Empty; MAX_STARS];
    for (i, star) in stars.iter_mut().enumerate() {
        if i < full {
            *star = Star::Full;
        } else if i == full && half {
            *star = Star::Half;
        }
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_payment_status() {
        assert_eq!(payment_status("PAID"), Badge::new(Success, "Paid"));
        assert_eq!(payment_status("  paid "), Badge::new(Success, "Paid"));
        assert_eq!(payment_status("UNKNOWN"), Badge::new(Neutral, "Unknown"));
        assert_eq!(payment_status(""), Badge::new(Neutral, "Unknown"));
    }

    #[test]
    fn test_refund_fallback_is_pending_review() {
        assert_eq!(refund_status("APPROVED").variant, Success);
        assert_eq!(refund_status("ESCALATED"), Badge::new(Warning, "Pending Review"));
        assert_eq!(refund_status("pending"), refund_status("ESCALATED"));
    }

    #[test]
    fn test_other_tables() {
        assert_eq!(order_status("shipped"), Badge::new(Primary, "Shipped"));
        assert_eq!(order_status("delivered").variant, Success);
        assert_eq!(booking_status("Checked_In").label, "Checked In");
        assert_eq!(event_status("sold_out"), Badge::new(Danger, "Sold Out"));
        assert_eq!(event_status("ARCHIVED"), Badge::new(Neutral, "Draft"));
        assert_eq!(listing_type("rent").label, "For Rent");
        assert_eq!(listing_type("barter"), Badge::new(Neutral, "Other"));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Danger.to_string(), "danger");
        assert_eq!(Primary.as_str(), "primary");
    }

    #[test]
    fn test_star_rating() {
        use Star::{Empty, Full, Half};

        assert_eq!(star_rating(3.5), [Full, Full, Full, Half, Empty]);
        assert_eq!(star_rating(3.49), [Full, Full, Full, Empty, Empty]);
        assert_eq!(star_rating(0.0), [Empty; 5]);
        assert_eq!(star_rating(5.0), [Full; 5]);
        assert_eq!(star_rating(7.2), [Full; 5]);
        assert_eq!(star_rating(-1.0), [Empty; 5]);
        assert_eq!(star_rating(f64::NAN), [Empty; 5]);
    }

    proptest! {
        #[test]
        fn prop_star_rating_counts(rating in 0.0f64..=5.0) {
            let stars = star_rating(rating);
            let full = stars.iter().filter(|s| **s == Star::Full).count();
            let half = stars.iter().filter(|s| **s == Star::Half).count();

            prop_assert_eq!(full, rating.floor() as usize);
            prop_assert!(half <= 1);
            prop_assert_eq!(half == 1, rating.fract() >= 0.5);
        }

        #[test]
        fn prop_lookups_are_total(input in ".*") {
            let badges = [
                payment_status(&input),
                refund_status(&input),
                order_status(&input),
                booking_status(&input),
                event_status(&input),
                listing_type(&input),
            ];
            prop_assert!(badges.iter().all(|badge| !badge.label.is_empty()));
        }
    }
}
