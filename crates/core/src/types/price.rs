//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole rupees. The payment gateway wants minor units
//! (paise), so conversion happens once at the gateway boundary via
//! [`Price::to_minor_units`].

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in Indian rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount in rupees.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The currency of every price in the store.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        CurrencyCode::INR
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Amount in paise, truncating anything below one paisa.
    ///
    /// Returns `None` if the amount does not fit in an `i64`.
    #[must_use]
    pub fn to_minor_units(&self) -> Option<i64> {
        self.0.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_i64()
    }

    /// Multiply by a line quantity, `None` on overflow.
    #[must_use]
    pub fn checked_times(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    #[must_use]
    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Addition that clamps at the representable range.
    #[must_use]
    pub fn saturating_add(&self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Multiply by a rate and round half away from zero to whole rupees.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn checked_rate_rounded(&self, rate: Decimal) -> Option<Self> {
        self.0
            .checked_mul(rate)
            .map(|v| Self(v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)))
    }

    /// Format as `₹2,45,000` using Indian digit grouping.
    #[must_use]
    pub fn display(&self) -> String {
        let negative = self.0.is_sign_negative() && !self.0.is_zero();
        let abs = self.0.abs();
        let whole = abs.trunc().to_u128().unwrap_or_default();
        let fraction = abs.fract();

        let mut out = String::from(if negative { "-₹" } else { "₹" });
        out.push_str(&group_indian(whole));
        if !fraction.is_zero() {
            let paise = (fraction * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u8()
                .unwrap_or_default();
            out.push_str(&format!(".{paise:02}"));
        }
        out
    }
}

/// Group digits as lakh/crore: the last three digits, then pairs.
fn group_indian(value: u128) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(head.get(start..end).unwrap_or_default());
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// ISO 4217 currency codes accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// The three-letter code sent to the payment gateway.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units() {
        assert_eq!(Price::from_rupees(29_999).to_minor_units(), Some(2_999_900));
        assert_eq!(Price::new(Decimal::new(1999, 2)).to_minor_units(), Some(1999));
        assert_eq!(Price::ZERO.to_minor_units(), Some(0));
    }

    #[test]
    fn test_rate_rounds_half_away_from_zero() {
        let tax = Price::from_rupees(24_999).checked_rate_rounded(Decimal::new(18, 2));
        assert_eq!(tax, Some(Price::from_rupees(4500)));

        // 25 * 0.18 = 4.5 rounds up, unlike banker's rounding
        let tax = Price::from_rupees(25).checked_rate_rounded(Decimal::new(18, 2));
        assert_eq!(tax, Some(Price::from_rupees(5)));
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Price::from_rupees(0).display(), "₹0");
        assert_eq!(Price::from_rupees(500).display(), "₹500");
        assert_eq!(Price::from_rupees(24_999).display(), "₹24,999");
        assert_eq!(Price::from_rupees(245_000).display(), "₹2,45,000");
        assert_eq!(Price::from_rupees(12_345_678).display(), "₹1,23,45,678");
        assert_eq!(Price::new(Decimal::new(150_050, 2)).display(), "₹1,500.50");
    }

    #[test]
    fn test_checked_arithmetic() {
        let line = Price::from_rupees(100).checked_times(3).unwrap();
        assert_eq!(line.checked_add(Price::from_rupees(50)), Some(Price::from_rupees(350)));
        assert_eq!(line.checked_sub(Price::from_rupees(500)), Some(Price::from_rupees(-200)));
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Price::from_rupees(1)), None);
        assert_eq!(huge.checked_rate_rounded(Decimal::TWO), None);
        assert_eq!(huge.to_minor_units(), None);
        assert_eq!(huge.saturating_add(Price::from_rupees(1)), huge);
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let from_number: Price = serde_json::from_str("24999").unwrap();
        let from_string: Price = serde_json::from_str("\"24999\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, Price::from_rupees(24_999));
    }
}
