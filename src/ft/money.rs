use crate::Result;

use std::fmt;
use std::ops::{Add, Sub};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use thiserror::Error;

/// Number of stored units per whole currency unit (four decimal places)
const SCALE: i64 = 10_000;

#[derive(Error, Debug)]
pub enum MoneyError {
    #[error("Money parse error: {0}, {1}")]
    Parse(&'static str, String),
}

/// Fixed-point amount, stored in ten-thousandths of a currency unit.
///
/// A single amount is bounded by `MAX_AMOUNT`, so totals over any realistic number of
/// transactions fit in the `i128` representation and adding them cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub i128);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const MAX_AMOUNT: Self = Self(i64::MAX as i128);

    /// Parses a decimal string such as `4.50`, `2000` or `1e3`
    pub fn parse(string: &str) -> Result<Self> {
        let trimmed = string.trim();

        let value: f64 = trimmed
            .parse()
            .map_err(|_| MoneyError::Parse("Not a number", trimmed.to_string()))?;

        Self::from_f64(value)
    }

    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            Err(MoneyError::Parse("Not a finite number", value.to_string()))?
        }

        let scaled = (value * SCALE as f64).round();

        if scaled.abs() >= Self::MAX_AMOUNT.0 as f64 {
            Err(MoneyError::Parse("Out of range", value.to_string()))?
        }

        Ok(Money(scaled as i128))
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Shortest decimal text that parses back to the same amount, used to refill the input form
    pub fn to_input_string(&self) -> String {
        self.as_f64().to_string()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Two decimal places, rounding half away from zero
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.0;
        let cents = (value.abs() + (SCALE as i128 / 200)) / (SCALE as i128 / 100);
        let sign = if value < 0 && cents != 0 { "-" } else { "" };

        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value).map_err(de::Error::custom)
    }
}
