//! # Validation Module
//!
//! Per-field and whole-form validation for product registration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Sanitizers (on every keystroke)                               │
//! │  ├── Strip characters the field can never contain                       │
//! │  └── See sanitize module                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (on change and on submit)                         │
//! │  ├── Per-field rules  → validate_name, validate_price, ...              │
//! │  └── Whole-form rule  → validate_form (includes cross-field price)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Registration flow (against the store)                         │
//! │  └── Duplicate-barcode check, needs I/O so it lives outside core        │
//! │                                                                         │
//! │  Form validity is recomputed from scratch on every change; there is     │
//! │  no cached validity flag to fall out of sync.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bodega_core::validation::{validate_form, validate_name};
//! use bodega_core::types::ProductForm;
//! use chrono::NaiveDate;
//!
//! assert!(validate_name("productName", "Abcd").is_ok());
//! assert!(validate_name("productName", "Ab").is_err());
//!
//! let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
//! let empty = ProductForm::new();
//! assert!(validate_form(&empty, today).is_err());
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::category::Category;
use crate::error::{FormErrors, MoneyParseError, ValidationError};
use crate::money::Money;
use crate::types::{NewProduct, ProductForm};
use crate::MIN_NAME_LETTERS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a name-like field (product name, brand).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must contain at least [`MIN_NAME_LETTERS`] alphabetic characters
///   (spaces do not count, so "a b c" has 3 letters, not 5)
///
/// ## Returns
/// The trimmed value.
///
/// ## Example
/// ```rust
/// use bodega_core::validation::validate_name;
///
/// assert!(validate_name("brand", "Bimbo").is_ok());
/// assert!(validate_name("brand", "Ab").is_err());
/// assert!(validate_name("brand", "").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let letters = value.chars().filter(|c| c.is_alphabetic()).count();
    if letters < MIN_NAME_LETTERS {
        return Err(ValidationError::TooFewLetters {
            field: field.to_string(),
            min: MIN_NAME_LETTERS,
        });
    }

    Ok(value.to_string())
}

/// Validates a scanned barcode.
///
/// ## Rules
/// - Must not be empty (a form that was never scanned has no barcode)
///
/// Scanners hand over the code verbatim; there is no format rule beyond
/// presence because accepted symbologies are enforced at scan time.
pub fn validate_barcode(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates text that must be a positive whole number.
///
/// Used for the stock field at registration AND for stock-adjustment
/// quantities, so both paths reject exactly the same inputs.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Every character must be an ASCII digit (no sign, no decimal point)
/// - The value must be strictly greater than zero
///
/// ## Example
/// ```rust
/// use bodega_core::validation::validate_positive_integer;
///
/// assert_eq!(validate_positive_integer("stock", "12").unwrap(), 12);
/// assert_eq!(validate_positive_integer("stock", "007").unwrap(), 7);
/// assert!(validate_positive_integer("stock", "0").is_err());
/// assert!(validate_positive_integer("stock", "-3").is_err());
/// assert!(validate_positive_integer("stock", "1.5").is_err());
/// ```
pub fn validate_positive_integer(field: &str, value: &str) -> ValidationResult<i64> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "only digits are allowed".to_string(),
        });
    }

    let number: i64 = value.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "number is too large".to_string(),
    })?;

    if number == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(number)
}

/// Validates a price field, producing exact [`Money`].
///
/// ## Rules
/// - Must parse as a decimal with at most 2 fraction digits
/// - Must be strictly greater than zero
///
/// ## Example
/// ```rust
/// use bodega_core::validation::validate_price;
///
/// assert_eq!(validate_price("salePrice", "10.99").unwrap().cents(), 1099);
/// assert!(validate_price("salePrice", "0.00").is_err());
/// assert!(validate_price("salePrice", "").is_err());
/// ```
pub fn validate_price(field: &str, value: &str) -> ValidationResult<Money> {
    let money = Money::parse_decimal(value).map_err(|err| match err {
        MoneyParseError::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        MoneyParseError::Malformed { .. } => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "not a valid decimal number".to_string(),
        },
        MoneyParseError::TooManyFractionDigits { max } => ValidationError::TooManyFractionDigits {
            field: field.to_string(),
            max,
        },
        MoneyParseError::OutOfRange => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "amount is too large".to_string(),
        },
    })?;

    if !money.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(money)
}

/// Checks the cross-field price rule: sale price strictly above purchase.
///
/// Equal prices are rejected; selling at cost is not a valid listing.
pub fn validate_price_order(purchase: Money, sale: Money) -> ValidationResult<()> {
    if sale <= purchase {
        return Err(ValidationError::SalePriceTooLow { purchase, sale });
    }

    Ok(())
}

// =============================================================================
// Domain Validators
// =============================================================================

/// Validates the category picker value.
///
/// The picker's unselected state is the empty string, which reports as a
/// missing field rather than an unknown label.
pub fn validate_category(label: &str) -> ValidationResult<Category> {
    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Category::from_label(label).ok_or_else(|| ValidationError::UnknownCategory {
        label: label.to_string(),
    })
}

/// Validates the expiration date against the minimum allowed date.
///
/// ## Rules
/// - A date must have been picked
/// - The date must be STRICTLY after `min_exclusive` (picking today fails)
///
/// The minimum is passed in rather than read from the clock so callers and
/// tests control what "today" means.
pub fn validate_expiration(
    date: Option<NaiveDate>,
    min_exclusive: NaiveDate,
) -> ValidationResult<NaiveDate> {
    let date = date.ok_or_else(|| ValidationError::Required {
        field: "expirationDate".to_string(),
    })?;

    if date <= min_exclusive {
        return Err(ValidationError::DateTooEarly {
            field: "expirationDate".to_string(),
            min: min_exclusive,
        });
    }

    Ok(date)
}

// =============================================================================
// Whole-Form Validation
// =============================================================================

/// Validates the whole form, collecting every field error at once.
///
/// ## Behavior
/// - Every field is checked even after the first failure, so the UI can
///   mark all invalid fields in one pass
/// - The cross-field price rule runs only when both prices parse, and its
///   error lands on the `salePrice` field
/// - On success, returns the typed [`NewProduct`] with text fields trimmed,
///   stock and prices converted, and the date pinned to midnight UTC
///
/// `today` is the exclusive lower bound for the expiration date.
pub fn validate_form(form: &ProductForm, today: NaiveDate) -> Result<NewProduct, FormErrors> {
    let mut errors = FormErrors::new();

    let product_name = check(
        &mut errors,
        "productName",
        validate_name("productName", form.product_name()),
    );
    let brand = check(&mut errors, "brand", validate_name("brand", form.brand()));
    let stock = check(
        &mut errors,
        "stock",
        validate_positive_integer("stock", form.stock_text()),
    );
    let category = check(
        &mut errors,
        "category",
        validate_category(form.category_label()),
    );
    let purchase_price = check(
        &mut errors,
        "purchasePrice",
        validate_price("purchasePrice", form.purchase_price_text()),
    );
    let sale_price = check(
        &mut errors,
        "salePrice",
        validate_price("salePrice", form.sale_price_text()),
    );

    if let (Some(purchase), Some(sale)) = (purchase_price, sale_price) {
        if let Err(err) = validate_price_order(purchase, sale) {
            errors.insert("salePrice", err);
        }
    }

    let barcode = check(&mut errors, "barcode", validate_barcode(form.barcode()));
    let expiration = check(
        &mut errors,
        "expirationDate",
        validate_expiration(form.expiration_date(), today),
    );

    match (
        product_name,
        brand,
        stock,
        category,
        purchase_price,
        sale_price,
        barcode,
        expiration,
    ) {
        (
            Some(product_name),
            Some(brand),
            Some(stock),
            Some(category),
            Some(purchase_price),
            Some(sale_price),
            Some(barcode),
            Some(expiration),
        ) if errors.is_empty() => Ok(NewProduct {
            product_name,
            brand,
            stock,
            category,
            purchase_price,
            sale_price,
            barcode,
            expiration_date: expiration.and_time(NaiveTime::MIN).and_utc(),
        }),
        _ => Err(errors),
    }
}

/// Convenience check that drives the submit button's enabled state.
pub fn form_is_valid(form: &ProductForm, today: NaiveDate) -> bool {
    validate_form(form, today).is_ok()
}

/// Records a failed field check and keeps the value of a passing one.
fn check<T>(errors: &mut FormErrors, field: &str, result: ValidationResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.insert(field, err);
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
