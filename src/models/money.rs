//! Money type for representing expense amounts
//!
//! Amounts are stored as integer cents (i64). Conversion from a decimal
//! major-unit amount only happens at the input boundary and always rounds to
//! the nearest cent, half away from zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Decimal places kept when pre-rounding a scaled float.
///
/// `1.005 * 100.0` evaluates to `100.49999999999999`; trimming the binary
/// noise first makes it round to 101 like the decimal literal suggests.
const PRE_ROUND_SCALE: f64 = 1e6;

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount (e.g. `12.345`) to cents
    ///
    /// Rounds to the nearest cent, halves away from zero. Returns `None` for
    /// NaN, infinities and values outside the i64 cent range.
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// assert_eq!(Money::from_major_units(12.345).unwrap().cents(), 1235);
    /// assert_eq!(Money::from_major_units(1.005).unwrap().cents(), 101);
    /// ```
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let scaled = (amount * 100.0 * PRE_ROUND_SCALE).round() / PRE_ROUND_SCALE;
        let cents = scaled.round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole major units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Subtraction that returns `None` instead of overflowing
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse a user-typed amount such as `"12.50"`, `"12,50"` or `"-3"`
    ///
    /// The comma is accepted as decimal separator. Rounding follows
    /// [`Money::from_major_units`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let normalized = s.trim().replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.trim().to_string()))?;
        Self::from_major_units(value).ok_or_else(|| MoneyParseError::OutOfRange(s.trim().to_string()))
    }

    /// Format with a currency symbol, e.g. `€12.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.major().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.major(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Major units with exactly two decimals, e.g. `50.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
