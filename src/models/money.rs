//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) to avoid
//! floating-point drift. Input arrives as decimal numbers from the caller's
//! document store, so deserialization rounds to two places once at the
//! boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use cashpilot::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a decimal amount, rounding half away from zero to two places
    pub fn from_decimal(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }

        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }

        Ok(Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
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

    /// Addition that reports overflow instead of wrapping
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Addition clamped to the representable range
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtraction that reports overflow instead of wrapping
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Approximate value as a float, for chart geometry only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "₦1,234.5", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Drop a leading currency symbol and any grouping commas
        let digits: String = s
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        if digits.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = if let Some((whole, frac)) = digits.split_once('.') {
            if frac.contains('.') {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            let whole: i64 = if whole.is_empty() {
                0
            } else {
                whole
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
            };

            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            // Round on the third fractional digit
            let mut padded: String = frac.chars().chain("000".chars()).take(3).collect();
            let third = padded.pop().and_then(|c| c.to_digit(10)).unwrap_or(0) as i64;
            let cents: i64 = padded
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

            whole
                .checked_mul(100)
                .and_then(|w| w.checked_add(cents + i64::from(third >= 5)))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            digits
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Render as a bare decimal with two places, e.g. "1234.50" or "-234.50"
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Accepted wire shapes for an amount
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match RawAmount::deserialize(deserializer)? {
            RawAmount::Integer(units) => units
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| MoneyParseError::OutOfRange(units.to_string())),
            RawAmount::Decimal(value) => Money::from_decimal(value),
            RawAmount::Text(text) => Money::parse(&text),
        };

        parsed.map_err(serde::de::Error::custom)
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
    NotFinite,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
            MoneyParseError::NotFinite => write!(f, "Amount must be a finite number"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(123450).to_plain_string(), "1234.50");
        assert_eq!(Money::from_cents(0).to_plain_string(), "0.00");
        assert_eq!(Money::from_cents(-23450).to_plain_string(), "-234.50");
        assert_eq!(Money::from_cents(-5).to_plain_string(), "-0.05");
    }

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(1234.5).unwrap().cents(), 123450);
        assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
        assert_eq!(Money::from_decimal(-234.5).unwrap().cents(), -23450);
        assert_eq!(Money::from_decimal(f64::NAN), Err(MoneyParseError::NotFinite));
        assert_eq!(
            Money::from_decimal(f64::INFINITY),
            Err(MoneyParseError::NotFinite)
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(5_000_000_000_000_000_000);

        assert_eq!(big.checked_add(big), None);
        assert_eq!(
            Money::from_cents(100).checked_add(Money::from_cents(50)),
            Some(Money::from_cents(150))
        );
        assert_eq!(big.saturating_add(big).cents(), i64::MAX);
        assert_eq!((-big).checked_sub(big), None);
        assert_eq!(
            Money::from_cents(100).checked_sub(Money::from_cents(250)),
            Some(Money::from_cents(-150))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₦1,234.5").unwrap().cents(), 123450);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_deserialize_wire_shapes() {
        let from_int: Money = serde_json::from_str("1000").unwrap();
        let from_float: Money = serde_json::from_str("1234.5").unwrap();
        let from_text: Money = serde_json::from_str("\"99.99\"").unwrap();

        assert_eq!(from_int.cents(), 100000);
        assert_eq!(from_float.cents(), 123450);
        assert_eq!(from_text.cents(), 9999);
    }

    #[test]
    fn test_serialize_as_decimal() {
        let json = serde_json::to_string(&Money::from_cents(123450)).unwrap();
        assert_eq!(json, "1234.5");
    }
}
