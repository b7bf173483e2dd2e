//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// A monetary amount in the shop's single currency.
///
/// Backed by [`Decimal`] so that totals never accumulate binary
/// floating-point error: `2.99 + 1.99` is exactly `4.98`.
///
/// Serializes as a decimal string with at least two places (`"0.00"`,
/// `"2.99"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero, the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Highest price a catalog item may carry: 1,000,000,000.00.
    ///
    /// Item prices are checked against this on the way into the catalog,
    /// which keeps any realistic cart total far below [`Decimal::MAX`].
    pub const MAX: Self = Self(Decimal::from_parts(0x4876_E800, 0x17, 0, false, 2));

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents, e.g. `299` for `2.99`.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Whether the amount is above [`Price::MAX`].
    #[must_use]
    pub fn exceeds_max(&self) -> bool {
        *self > Self::MAX
    }

    /// Add two prices, returning `None` if the sum overflows.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Saturates at [`Decimal::MAX`] instead of panicking. Use
/// [`Price::checked_add`] where overflow must be detected.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut amount = self.0;
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        Serialize::serialize(&amount, serializer)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(299).amount(), Decimal::new(299, 2));
        assert_eq!(Price::from_cents(-5).amount(), Decimal::new(-5, 2));
        assert_eq!(Price::from_cents(0), Price::ZERO);
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Price = [Price::from_cents(299), Price::from_cents(199)]
            .iter()
            .sum();
        assert_eq!(total, Price::from_cents(498));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = core::iter::empty::<Price>().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::new(Decimal::new(3, 0)).to_string(), "3.00");
        assert_eq!(Price::from_cents(299).to_string(), "2.99");
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
        assert!(!Price::from_cents(1).is_negative());
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_cents(299)).ok();
        assert_eq!(json.as_deref(), Some("\"2.99\""));
    }

    #[test]
    fn test_serializes_at_least_two_places() {
        let zero = serde_json::to_string(&Price::ZERO).ok();
        assert_eq!(zero.as_deref(), Some("\"0.00\""));

        let whole = serde_json::to_string(&Price::new(Decimal::new(3, 0))).ok();
        assert_eq!(whole.as_deref(), Some("\"3.00\""));

        let fine = serde_json::to_string(&Price::new(Decimal::new(2995, 3))).ok();
        assert_eq!(fine.as_deref(), Some("\"2.995\""));
    }

    #[test]
    fn test_deserializes_from_string() {
        let price: Option<Price> = serde_json::from_str("\"1.99\"").ok();
        assert_eq!(price, Some(Price::from_cents(199)));
    }

    #[test]
    fn test_max() {
        assert_eq!(Price::MAX, Price::from_cents(100_000_000_000));
        assert!(!Price::MAX.exceeds_max());
        assert!(Price::new(Decimal::new(100_000_000_001, 2)).exceeds_max());
    }

    #[test]
    fn test_overflow_saturates_or_is_reported() {
        let huge = Price::new(Decimal::MAX);

        assert_eq!(huge + huge, huge);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(
            Price::from_cents(1).checked_add(Price::from_cents(2)),
            Some(Price::from_cents(3))
        );
    }
}
