//! Exact fixed-point currency amounts.
//!
//! Amounts enter the system as IEEE-754 doubles exactly once, at decode time,
//! and are truncated to whole cents. Everything downstream is checked `i64`
//! arithmetic, so totals neither drift nor silently wrap.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A signed amount held as an integer count of cents.
///
/// # Examples
///
/// ```
/// use mps7::Cents;
///
/// let amount = Cents::from_f64_truncated(10.5);
/// assert_eq!(amount.as_i64(), 1050);
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!(Cents::new(-105).to_string(), "-1.05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(i64);

impl Cents {
    /// Number of cents in one dollar.
    pub const PER_DOLLAR: i64 = 100;

    /// Zero value.
    pub const ZERO: Self = Cents(0);

    pub const fn new(cents: i64) -> Self {
        Cents(cents)
    }

    /// Converts a dollar amount to cents, truncating toward zero.
    ///
    /// Non-finite input follows `as` saturation: NaN becomes zero and the
    /// infinities clamp to the `i64` bounds.
    pub fn from_f64_truncated(dollars: f64) -> Self {
        Cents((dollars * Self::PER_DOLLAR as f64).trunc() as i64)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` if the sum leaves the `i64` range.
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Cents(sum)),
            None => None,
        }
    }

    /// Returns the amount as a `Decimal` with two decimal places.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Cents {
    /// Renders `dollars.cents` with the sign placed once, in front.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_dollar = Self::PER_DOLLAR as u64;
        write!(
            f,
            "{}{}.{:02}",
            sign,
            magnitude / per_dollar,
            magnitude % per_dollar
        )
    }
}

/// Error returned when a string is not a valid `dollars.cents` amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid amount {0:?}")]
pub struct ParseCentsError(String);

impl FromStr for Cents {
    type Err = ParseCentsError;

    /// Parses an amount with at most two decimal places.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCentsError(s.to_string());
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).map_err(|_| invalid())?;
        if decimal.scale() > 2 {
            return Err(invalid());
        }

        let mantissa = decimal
            .mantissa()
            .checked_mul(10i128.pow(2 - decimal.scale()))
            .ok_or_else(invalid)?;
        let cents = i64::try_from(mantissa).map_err(|_| invalid())?;
        Ok(Cents(cents))
    }
}

impl Serialize for Cents {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
