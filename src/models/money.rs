//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64, e.g. hundredths) to avoid
//! floating-point precision issues. Conversion to major units happens only at
//! display and export boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as integer minor units (hundredths)
///
/// Using i64 minor units keeps every aggregation exact and supports amounts
/// far beyond any realistic personal ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use pocketledger::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the amount in major units as a decimal value
    ///
    /// For display and export only; never feed this back into arithmetic.
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a major-unit decimal string ("125.50", "125", "125.5")
    ///
    /// This is the import boundary conversion: major units × 100 into minor
    /// units. At most two fractional digits are accepted.
    pub fn parse_major(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        // The sign was stripped above; both parts must be bare digit runs so
        // an embedded sign ("10.-5") cannot slip through the integer parse.
        let minor = match s.split_once('.') {
            Some((whole, frac)) => {
                let whole = parse_digits(whole, s)?;
                let frac_minor = match frac.len() {
                    1 => parse_digits(frac, s)? * 10,
                    2 => parse_digits(frac, s)?,
                    _ => return Err(MoneyParseError::InvalidFormat(s.to_string())),
                };
                whole
                    .checked_mul(100)
                    .and_then(|w| w.checked_add(frac_minor))
                    .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
            }
            None => parse_digits(s, s)?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?,
        };

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Parse an integer minor-unit string (the stored record format)
    pub fn parse_minor(s: &str) -> Result<Self, MoneyParseError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))
    }

    /// Format with a currency symbol, e.g. `$10.50` / `-$10.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let whole = (self.0 / 100).abs();
        let frac = (self.0 % 100).abs();
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, whole, frac)
        } else {
            format!("{}{}.{:02}", symbol, whole, frac)
        }
    }
}

/// Parse an unsigned digit run; `full` is the original input for the error
fn parse_digits(part: &str, full: &str) -> Result<i64, MoneyParseError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyParseError::InvalidFormat(full.to_string()));
    }
    part.parse()
        .map_err(|_| MoneyParseError::InvalidFormat(full.to_string()))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = (self.0 / 100).abs();
        let frac = (self.0 % 100).abs();
        if self.is_negative() {
            write!(f, "-{}.{:02}", whole, frac)
        } else {
            write!(f, "{}.{:02}", whole, frac)
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

/// Serialize a Money value as a major-unit decimal (export boundary)
pub fn serialize_major<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(money.to_major())
}

/// Serialize an optional Money value as a major-unit decimal or null
pub fn serialize_major_opt<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match money {
        Some(m) => serializer.serialize_f64(m.to_major()),
        None => serializer.serialize_none(),
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(1050);
        assert_eq!(m.minor(), 1050);
        assert_eq!(m.to_major(), 10.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_minor(0)), "0.00");
        assert_eq!(format!("{}", Money::from_minor(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_minor(5)), "0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_minor(1050).format_with_symbol("$"), "$10.50");
        assert_eq!(Money::from_minor(-1050).format_with_symbol("$"), "-$10.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((-a).minor(), -1000);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(Money::parse_major("10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("-10.50").unwrap().minor(), -1050);
        assert_eq!(Money::parse_major("10").unwrap().minor(), 1000);
        assert_eq!(Money::parse_major("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("0.05").unwrap().minor(), 5);
        assert!(Money::parse_major("10.123").is_err());
        assert!(Money::parse_major("abc").is_err());
        assert!(Money::parse_major("").is_err());
    }

    #[test]
    fn test_parse_major_rejects_embedded_sign() {
        assert!(Money::parse_major("10.-5").is_err());
        assert!(Money::parse_major("10.+5").is_err());
        assert!(Money::parse_major("+10").is_err());
        assert!(Money::parse_major("1-0.50").is_err());
        assert!(Money::parse_major("-.").is_err());
    }

    #[test]
    fn test_parse_major_rejects_overflow() {
        // i64::MAX major units cannot be scaled into minor units
        assert!(Money::parse_major("9223372036854775807").is_err());
        assert!(Money::parse_major("9223372036854775807.99").is_err());
        assert!(Money::parse_major("-9223372036854775807").is_err());
        // The largest representable amount still parses
        assert_eq!(
            Money::parse_major("92233720368547758.07").unwrap().minor(),
            i64::MAX
        );
    }

    #[test]
    fn test_parse_minor() {
        assert_eq!(Money::parse_minor("1050").unwrap().minor(), 1050);
        assert_eq!(Money::parse_minor("-5").unwrap().minor(), -5);
        assert!(Money::parse_minor("10.50").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_minor(100),
            Money::from_minor(200),
            Money::from_minor(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.minor(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
