use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Money type backed by an exact decimal.
///
/// Arithmetic never rounds. Rounding happens once per reported value through
/// [`Money::round_to_unit`] or [`Money::round_dp`], both half-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?))
    }

    /// create from whole currency units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half-up to whole currency units
    pub fn round_to_unit(&self) -> Self {
        self.round_dp(0)
    }

    /// round half-up to the given decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(round_half_up(self.0, dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly below zero; negative zero is not negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// apply a rate (e.g. 1.4% of the amount), unrounded
    pub fn apply_rate(&self, rate: Rate) -> Self {
        Money(self.0 * rate.as_decimal())
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// `None` when the product leaves the decimal range
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    pub fn checked_apply_rate(self, rate: Rate) -> Option<Money> {
        self.checked_mul(rate.as_decimal())
    }

    /// whole-unit value as i64, if it fits
    pub fn to_i64(&self) -> Option<i64> {
        self.round_to_unit().0.to_i64()
    }
}

/// round half-up (midpoint away from zero)
pub fn round_half_up(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `base^periods` by repeated multiplication; `None` on overflow
pub fn compound_factor(base: Decimal, periods: u32) -> Option<Decimal> {
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i64> for Money {
    fn from(i: i64) -> Self {
        Money::from_major(i)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money(Decimal::from(i))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(self.0 / other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// rate type for interest rates, fee rates and tax rates
///
/// Stored as a fraction (0.045 for 4.5%). Inputs arrive as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal fraction (e.g., 0.045 for 4.5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage figure (e.g., 4.5 for 4.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::ONE_HUNDRED)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(Money::from_decimal(dec!(2.5)).round_to_unit(), Money::from_major(3));
        assert_eq!(Money::from_decimal(dec!(2.4999)).round_to_unit(), Money::from_major(2));
        assert_eq!(Money::from_decimal(dec!(-2.5)).round_to_unit(), Money::from_major(-3));
        assert_eq!(Money::from_decimal(dec!(1.005)).round_dp(2), Money::from_decimal(dec!(1.01)));
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let third = Money::from_major(10) / dec!(3);
        let back = third * dec!(3);
        assert_eq!(back.round_dp(20), Money::from_major(10));
        assert_ne!(third, third.round_dp(2));
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(dec!(4.5));
        assert_eq!(rate.as_decimal(), dec!(0.045));
        assert_eq!(rate.monthly_rate().as_decimal(), dec!(0.00375));
        assert_eq!(rate.to_string(), "4.5%");
    }

    #[test]
    fn test_apply_rate() {
        let fee = Money::from_major(10_000_000).apply_rate(Rate::from_percent(dec!(1.4)));
        assert_eq!(fee.round_to_unit(), Money::from_major(140_000));
    }

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(1.1), 0), Some(Decimal::ONE));
        assert_eq!(compound_factor(dec!(1.1), 2), Some(dec!(1.21)));
        // 1000% a year is 83.3% a month; 480 months of that leaves the decimal range
        assert_eq!(compound_factor(Decimal::ONE + dec!(10) / dec!(12), 480), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::ONE), None);
        assert_eq!(max.checked_mul(dec!(2)), None);
        assert_eq!(Money::from_major(3).checked_mul(dec!(2)), Some(Money::from_major(6)));
        assert_eq!(
            Money::from_major(1_000).checked_apply_rate(Rate::from_percentage(5)),
            Some(Money::from_major(50))
        );
        assert_eq!(Money::from_major(-1).checked_sub(max), None);
    }

    #[test]
    fn test_negative_zero_is_not_negative() {
        let z = Money::from_decimal(-Decimal::ZERO);
        assert!(!z.is_negative());
        assert!(Money::from_major(-1).is_negative());
    }
}
