//! Money value object.
//!
//! Amounts are whole currency units (the fee schedule is quoted in whole
//! shillings), stored as i64. Never floats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Monetary amount in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from whole units.
    pub fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole units.
    pub fn units(&self) -> i64 {
        self.0
    }

    /// Returns true when the amount is zero or negative.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a non-negative count (overdue periods).
    pub fn times(&self, count: i64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Subtraction floored at zero. Overpaid memberships owe nothing.
    pub fn saturating_sub(&self, other: Money) -> Self {
        Self((self.0 - other.0).max(0))
    }

    /// Divides an annual amount into a rounded monthly installment.
    pub fn divided_monthly(&self) -> Self {
        // Round half up, matching the published fee schedule.
        Self((self.0 * 2 + 12) / 24)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divided_monthly_rounds_half_up() {
        // 5000 / 12 = 416.67 -> 417
        assert_eq!(Money::new(5000).divided_monthly(), Money::new(417));
        // 3000 / 12 = 250
        assert_eq!(Money::new(3000).divided_monthly(), Money::new(250));
        // 1500 / 12 = 125
        assert_eq!(Money::new(1500).divided_monthly(), Money::new(125));
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(
            Money::new(3000).saturating_sub(Money::new(5000)),
            Money::ZERO
        );
        assert_eq!(
            Money::new(5000).saturating_sub(Money::new(3000)),
            Money::new(2000)
        );
    }

    #[test]
    fn times_multiplies() {
        assert_eq!(Money::new(417).times(2), Money::new(834));
        assert_eq!(Money::new(417).times(0), Money::ZERO);
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Money = [Money::new(100), Money::new(250), Money::new(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(400));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::new(417)).unwrap();
        assert_eq!(json, "417");
    }
}
