//! # bodega-core: Pure Business Logic for Bodega Inventory
//!
//! This crate is the **heart** of Bodega Inventory. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bodega Inventory Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Mobile Frontend                           │   │
//! │  │   Register UI ──► Scanner UI ──► Inventory UI ──► Search UI    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bodega-app (Flows)                           │   │
//! │  │    registration, scan session, stock adjust, search, feed      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bodega-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ category  │  │ sanitize  │  │   │
//! │  │   │  Product  │  │   Money   │  │  catalog  │  │ + validate│  │   │
//! │  │   │   Form    │  │  parsing  │  │  labels   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bodega-store (Document Layer)                   │   │
//! │  │           SQLite documents, live feeds, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product in its three shapes (form, create payload, read model)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`category`] - The fixed category catalog
//! - [`sanitize`] - Keystroke-level input cleaning
//! - [`validation`] - Per-field and whole-form rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Prices are cents (i64) internally, decimals on the wire
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_core::types::ProductForm;
//! use bodega_core::validation::validate_form;
//! use chrono::NaiveDate;
//!
//! let mut form = ProductForm::new();
//! form.set_product_name("Atún en agua #3"); // sanitized on set
//! form.set_brand("Dolores");
//! form.set_stock("12");
//! form.set_category("Alimentos y Bebidas");
//! form.set_purchase_price("8.50");
//! form.set_sale_price("10.99");
//! form.set_barcode("7501000000012");
//! form.set_expiration_date(NaiveDate::from_ymd_opt(2027, 3, 1).unwrap());
//!
//! let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
//! let new_product = validate_form(&form, today).unwrap();
//! assert_eq!(new_product.product_name, "Atún en agua");
//! assert_eq!(new_product.sale_price.cents(), 1099);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod money;
pub mod sanitize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Money` instead of
// `use bodega_core::money::Money`

pub use category::{Category, UNCATEGORIZED_LABEL};
pub use error::{FormErrors, MoneyParseError, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum alphabetic characters for name-like fields (product name, brand)
///
/// ## Business Reason
/// Two-letter entries are almost always typos or placeholder junk ("aa").
/// Four letters is the shortest string the catalog owners consider a name.
pub const MIN_NAME_LETTERS: usize = 4;

/// Maximum words kept in a name-like field
///
/// ## Business Reason
/// Product cards truncate past six words; anything longer is description,
/// not a name, so the sanitizer discards it up front.
pub const MAX_NAME_WORDS: usize = 6;

/// Maximum fraction digits for price fields
///
/// ## Business Reason
/// Prices are cents. A third decimal digit cannot be stored or charged,
/// so both the sanitizer and the parser cut at two.
pub const MAX_FRACTION_DIGITS: usize = 2;
