//! # Sanitize Module
//!
//! Pure text-cleaning functions applied to raw keystrokes before validation.
//!
//! ## Input Cleaning Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Cleaning Pipeline                            │
//! │                                                                         │
//! │  Raw keystrokes           sanitize_name            Clean value         │
//! │  "Café  con--Leche 3!" ──► letters + spaces only ──► "Café conLeche"   │
//! │                            words capped at 6                           │
//! │                                                                         │
//! │  Raw keystrokes           sanitize_decimal          Clean value        │
//! │  "$10.99.50"           ──► digits + one point    ──► "10.99"           │
//! │                            2 fraction digits max                       │
//! │                                                                         │
//! │  Raw keystrokes           sanitize_integer          Clean value        │
//! │  "12 pcs"              ──► digits only           ──► "12"              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! 1. Sanitizers never fail; hopeless input degrades to an empty string
//! 2. Sanitizers are idempotent: running one twice equals running it once
//! 3. Sanitizers clean, validators judge; no rule rejection happens here

use crate::{MAX_FRACTION_DIGITS, MAX_NAME_WORDS};

// =============================================================================
// Name Fields
// =============================================================================

/// Cleans a name-like field (product name, brand).
///
/// ## Rules
/// - Keeps letters (including accented ones) and whitespace, drops the rest
/// - Collapses whitespace runs to single spaces and trims the ends
/// - Keeps at most [`MAX_NAME_WORDS`] words; later words are discarded
///
/// ## Example
/// ```rust
/// use bodega_core::sanitize::sanitize_name;
///
/// assert_eq!(sanitize_name("  Café   con--Leche 123 "), "Café conLeche");
/// assert_eq!(
///     sanitize_name("uno dos tres cuatro cinco seis siete"),
///     "uno dos tres cuatro cinco seis"
/// );
/// assert_eq!(sanitize_name("1234!!"), "");
/// ```
pub fn sanitize_name(input: &str) -> String {
    let letters_and_spaces: String = input
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    letters_and_spaces
        .split_whitespace()
        .take(MAX_NAME_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Numeric Fields
// =============================================================================

/// Cleans a decimal price field.
///
/// ## Rules
/// - Keeps ASCII digits and at most one decimal point
/// - A point before any digit is dropped (".5" becomes "5")
/// - Digits after a second point join the fraction ("1.2.3" becomes "1.23")
/// - The fraction is truncated to [`MAX_FRACTION_DIGITS`] digits
///
/// ## Example
/// ```rust
/// use bodega_core::sanitize::sanitize_decimal;
///
/// assert_eq!(sanitize_decimal("$10.99"), "10.99");
/// assert_eq!(sanitize_decimal("1.2.3"), "1.23");
/// assert_eq!(sanitize_decimal(".50"), "50");
/// assert_eq!(sanitize_decimal("10.999"), "10.99");
/// ```
pub fn sanitize_decimal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut seen_point = false;
    let mut fraction_digits = 0;

    for ch in input.chars() {
        match ch {
            '0'..='9' => {
                if seen_point {
                    if fraction_digits < MAX_FRACTION_DIGITS {
                        out.push(ch);
                        fraction_digits += 1;
                    }
                } else {
                    out.push(ch);
                }
            }
            '.' if !seen_point && !out.is_empty() => {
                out.push('.');
                seen_point = true;
            }
            _ => {}
        }
    }

    out
}

/// Cleans an integer quantity field by keeping ASCII digits only.
///
/// ## Example
/// ```rust
/// use bodega_core::sanitize::sanitize_integer;
///
/// assert_eq!(sanitize_integer("12 pcs"), "12");
/// assert_eq!(sanitize_integer("-5"), "5");
/// assert_eq!(sanitize_integer("abc"), "");
/// ```
pub fn sanitize_integer(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
