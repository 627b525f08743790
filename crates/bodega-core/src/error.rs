//! # Error Types
//!
//! Domain-specific error types for bodega-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bodega-core errors (this file)                                         │
//! │  ├── ValidationError  - Single-field validation failures                │
//! │  ├── MoneyParseError  - Decimal text that cannot become Money           │
//! │  └── FormErrors       - Per-field messages for a whole form             │
//! │                                                                         │
//! │  bodega-store errors (separate crate)                                   │
//! │  └── StoreError       - Document store operation failures               │
//! │                                                                         │
//! │  bodega-app errors (separate crate)                                     │
//! │  └── FlowError        - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → FormErrors → FlowError → Frontend              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any document is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Text does not contain enough letters.
    ///
    /// Counts alphabetic characters only, so "a b c d" passes with
    /// `min = 4` while "ab 12" does not.
    #[error("{field} must contain at least {min} letters")]
    TooFewLetters { field: String, min: usize },

    /// Invalid format (e.g., non-digit characters in a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be positive (zero is rejected too).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A decimal amount carries more fraction digits than allowed.
    #[error("{field} allows at most {max} decimal places")]
    TooManyFractionDigits { field: String, max: usize },

    /// Category label is not part of the catalog.
    #[error("'{label}' is not a recognized category")]
    UnknownCategory { label: String },

    /// Sale price must be strictly greater than purchase price.
    #[error("sale price {sale} must be greater than purchase price {purchase}")]
    SalePriceTooLow { purchase: Money, sale: Money },

    /// Date is not strictly after the minimum allowed date.
    #[error("{field} must be after {min}")]
    DateTooEarly { field: String, min: NaiveDate },

    /// Duplicate value (e.g., a barcode already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Errors produced while parsing decimal text into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The input was empty or whitespace.
    #[error("amount is empty")]
    Empty,

    /// The input contains characters besides digits and a single point.
    #[error("'{text}' is not a valid decimal amount")]
    Malformed { text: String },

    /// More fraction digits than cents can represent.
    #[error("amounts allow at most {max} decimal places")]
    TooManyFractionDigits { max: usize },

    /// The amount does not fit in the cent range.
    #[error("amount exceeds the representable range")]
    OutOfRange,
}

// =============================================================================
// Form Errors
// =============================================================================

/// Per-field error messages for a whole form.
///
/// Keys are wire field names (`productName`, `salePrice`, ...), values are
/// the rendered [`ValidationError`] messages. A `BTreeMap` keeps iteration
/// order stable, which keeps tests and UI snapshots deterministic.
///
/// ## Example
/// ```rust
/// use bodega_core::error::{FormErrors, ValidationError};
///
/// let mut errors = FormErrors::new();
/// errors.insert(
///     "stock",
///     ValidationError::MustBePositive {
///         field: "stock".to_string(),
///     },
/// );
/// assert_eq!(errors.get("stock"), Some("stock must be positive"));
/// assert!(errors.get("brand").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: BTreeMap<String, String>,
}

impl FormErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        FormErrors::default()
    }

    /// Creates an error map carrying a single field error.
    pub fn single(field: impl Into<String>, error: ValidationError) -> Self {
        let mut errors = FormErrors::new();
        errors.insert(field, error);
        errors
    }

    /// Records an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.insert(field.into(), error.to_string());
    }

    /// Returns the message for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Clears the error for a field, returning the removed message.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// Checks whether a field currently has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

/// Summary form used when a whole form fails validation.
impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no field errors");
        }
        let fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "{} invalid field(s): {}", fields.len(), fields.join(", "))
    }
}

impl std::error::Error for FormErrors {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "productName".to_string(),
        };
        assert_eq!(err.to_string(), "productName is required");

        let err = ValidationError::TooFewLetters {
            field: "brand".to_string(),
            min: 4,
        };
        assert_eq!(err.to_string(), "brand must contain at least 4 letters");

        let err = ValidationError::SalePriceTooLow {
            purchase: Money::from_cents(1000),
            sale: Money::from_cents(1000),
        };
        assert_eq!(
            err.to_string(),
            "sale price $10.00 must be greater than purchase price $10.00"
        );
    }

    #[test]
    fn test_date_too_early_message() {
        let err = ValidationError::DateTooEarly {
            field: "expirationDate".to_string(),
            min: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
        };
        assert_eq!(err.to_string(), "expirationDate must be after 2026-08-25");
    }

    #[test]
    fn test_money_parse_error_messages() {
        assert_eq!(MoneyParseError::Empty.to_string(), "amount is empty");
        assert_eq!(
            MoneyParseError::Malformed {
                text: "12x".to_string()
            }
            .to_string(),
            "'12x' is not a valid decimal amount"
        );
    }

    #[test]
    fn test_form_errors_collects_per_field() {
        let mut errors = FormErrors::new();
        errors.insert(
            "productName",
            ValidationError::Required {
                field: "productName".to_string(),
            },
        );
        errors.insert(
            "stock",
            ValidationError::MustBePositive {
                field: "stock".to_string(),
            },
        );

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("stock"));
        assert_eq!(errors.get("productName"), Some("productName is required"));
        assert!(errors.get("barcode").is_none());

        errors.remove("stock");
        assert_eq!(errors.len(), 1);
        assert!(!errors.contains("stock"));
    }

    #[test]
    fn test_form_errors_display_summary() {
        let mut errors = FormErrors::new();
        errors.insert(
            "stock",
            ValidationError::MustBePositive {
                field: "stock".to_string(),
            },
        );
        errors.insert(
            "brand",
            ValidationError::Required {
                field: "brand".to_string(),
            },
        );

        // BTreeMap iterates in key order
        assert_eq!(errors.to_string(), "2 invalid field(s): brand, stock");
    }

    #[test]
    fn test_form_errors_serialize_as_plain_map() {
        let errors = FormErrors::single(
            "barcode",
            ValidationError::Duplicate {
                field: "barcode".to_string(),
                value: "750100000001".to_string(),
            },
        );
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "barcode": "barcode '750100000001' already exists" })
        );
    }
}
