//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Comparing prices with floats:                                          │
//! │    10.10 > 10.099999999 ?  → answer depends on rounding noise           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.99" parses to 1099 cents, compared and stored exactly            │
//! │    The decimal form only exists at the wire boundary                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bodega_core::money::Money;
//!
//! // Parse user input (already sanitized)
//! let sale = Money::parse_decimal("10.99").unwrap();
//! let purchase = Money::parse_decimal("8.50").unwrap();
//!
//! assert_eq!(sale.cents(), 1099);
//! assert!(sale > purchase); // exact integer comparison
//! ```

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::MoneyParseError;
use crate::MAX_FRACTION_DIGITS;

// =============================================================================
// Money Type
// =============================================================================

/// A price in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 cents**: exact arithmetic and comparison, no float drift
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Parsing over construction**: user input goes through [`Money::parse_decimal`]
///
/// ## Serialization
/// Documents store prices as plain decimal numbers (`10.99`), so `Money`
/// serializes to an f64 number and deserializes from integer or float
/// numbers, rounding to the nearest cent. Cents never appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses sanitized decimal text into Money using integer math only.
    ///
    /// ## Rules
    /// - Digits with at most one point, at most 2 fraction digits
    /// - A missing fraction means whole units ("12" is $12.00)
    /// - One fraction digit means tens of cents ("1.5" is $1.50)
    /// - Anything else is rejected with a [`MoneyParseError`]
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.99").unwrap().cents(), 1099);
    /// assert_eq!(Money::parse_decimal("1.5").unwrap().cents(), 150);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("10.999").is_err());
    /// assert!(Money::parse_decimal("12x").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Self, MoneyParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };

        let all_digits =
            |s: &str| -> bool { !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) };

        // "12." and ".5" are tolerated; "." and "1.2.3" are not
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MoneyParseError::Malformed {
                text: trimmed.to_string(),
            });
        }
        if (!int_part.is_empty() && !all_digits(int_part))
            || (!frac_part.is_empty() && !all_digits(frac_part))
        {
            return Err(MoneyParseError::Malformed {
                text: trimmed.to_string(),
            });
        }
        if frac_part.len() > MAX_FRACTION_DIGITS {
            return Err(MoneyParseError::TooManyFractionDigits {
                max: MAX_FRACTION_DIGITS,
            });
        }

        let units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| MoneyParseError::OutOfRange)?
        };

        let fraction: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| MoneyParseError::OutOfRange)?
        };
        // One fraction digit stands for tens of cents
        let fraction = if frac_part.len() == 1 {
            fraction * 10
        } else {
            fraction
        };

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Money)
            .ok_or(MoneyParseError::OutOfRange)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and error messages. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Serializes as a decimal number, matching the document wire format.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

/// Deserializes from any JSON number, rounding to the nearest cent.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal amount of money")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
                value
                    .checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| E::custom("amount exceeds the representable range"))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
                let units = i64::try_from(value)
                    .map_err(|_| E::custom("amount exceeds the representable range"))?;
                self.visit_i64(units)
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
                if !value.is_finite() {
                    return Err(E::custom("amount must be a finite number"));
                }
                let cents = (value * 100.0).round();
                if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
                    return Err(E::custom("amount exceeds the representable range"));
                }
                Ok(Money(cents as i64))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
