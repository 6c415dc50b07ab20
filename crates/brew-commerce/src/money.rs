//! Whole-rupee money amounts.
//!
//! Every menu price is an integral number of rupees, so amounts are plain
//! `i64` values with no minor unit and no currency tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rupee symbol used when rendering amounts.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// An amount of money in whole rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a new amount.
    pub const fn new(rupees: i64) -> Self {
        Self(rupees)
    }

    /// Zero rupees.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in rupees.
    pub const fn rupees(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Add another amount, returning `None` on overflow.
    pub fn try_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sum amounts, returning `None` on overflow.
    pub fn try_sum(mut iter: impl Iterator<Item = Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }

    /// Format as a display string (e.g., "₹1,250").
    pub fn display(&self) -> String {
        format_currency(self.0)
    }
}

impl From<i64> for Money {
    fn from(rupees: i64) -> Self {
        Money(rupees)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render an amount as rupees with Indian digit grouping.
///
/// The last three digits form one group and the rest are grouped in
/// pairs: `1234567` becomes `₹12,34,567`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{RUPEE_SYMBOL}{}", group_en_in(&digits))
}

/// Round to the nearest rupee (halves away from zero), then format.
pub fn format_currency_rounded(amount: f64) -> String {
    format_currency(amount.round() as i64)
}

fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_currency(0), "\u{20b9}0");
        assert_eq!(Money::zero().display(), "\u{20b9}0");
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_currency(7), "\u{20b9}7");
        assert_eq!(format_currency(630), "\u{20b9}630");
    }

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(format_currency(1_250), "\u{20b9}1,250");
        assert_eq!(format_currency(12_345), "\u{20b9}12,345");
        assert_eq!(format_currency(123_456), "\u{20b9}1,23,456");
        assert_eq!(format_currency(1_234_567), "\u{20b9}12,34,567");
        assert_eq!(format_currency(123_456_789), "\u{20b9}12,34,56,789");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(-1_500), "-\u{20b9}1,500");
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_currency_rounded(29.5), "\u{20b9}30");
        assert_eq!(format_currency_rounded(1999.4), "\u{20b9}1,999");
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Money::new(180).try_multiply(2), Some(Money::new(360)));
        assert_eq!(Money::new(i64::MAX).try_multiply(2), None);
        assert_eq!(
            Money::try_sum([Money::new(1), Money::new(2)].into_iter()),
            Some(Money::new(3))
        );
        assert_eq!(
            Money::try_sum([Money::new(i64::MAX), Money::new(1)].into_iter()),
            None
        );
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::new(240)).unwrap(), "240");
    }
}
