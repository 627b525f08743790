//! # Core Types
//!
//! The product data model in its three shapes.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Product, Three Shapes                            │
//! │                                                                         │
//! │  ProductForm                NewProduct               Product            │
//! │  (editing state)            (create payload)         (read model)       │
//! │                                                                         │
//! │  raw strings    ──validate──►  typed fields  ──store──►  id + fields    │
//! │  sanitized on set              Money, Category,          raw category   │
//! │  no id yet                     DateTime<Utc>             label kept     │
//! │                                                                         │
//! │  Only validation turns a ProductForm into a NewProduct.                 │
//! │  Only the store turns a NewProduct into a stored document.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Document bodies use camelCase keys (`productName`, `salePrice`, ...),
//! prices are decimal numbers and dates are RFC 3339 strings. The document
//! id lives outside the body and is patched in when reading.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::Category;
use crate::money::Money;
use crate::sanitize::{sanitize_decimal, sanitize_integer, sanitize_name};

// =============================================================================
// Product (read model)
// =============================================================================

/// A stored product as read back from the document store.
///
/// ## Lenient By Design
/// Stored documents predate some rules (old app versions wrote fewer
/// fields, unknown category labels exist in the wild). This type mirrors
/// what is actually stored:
/// - `category` is the raw label, not a [`Category`]; unknown labels load fine
/// - `id` defaults to empty because document bodies do not carry it
/// - `created_at` defaults to the epoch for documents written before it existed
///
/// Strictness lives in validation, which only guards NEW writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier, immutable after creation.
    ///
    /// Not part of the stored body; readers patch it in from the document.
    #[serde(default)]
    pub id: String,

    /// Display name, letters and spaces only.
    pub product_name: String,

    /// Brand name, same shape as `product_name`.
    pub brand: String,

    /// Units on hand. Adjusted only through signed deltas after creation.
    pub stock: i64,

    /// Raw stored category label (usually one of [`Category`]'s labels).
    pub category: String,

    /// What the store pays per unit.
    pub purchase_price: Money,

    /// What the customer pays per unit.
    pub sale_price: Money,

    /// Scanned barcode, unique across products.
    pub barcode: String,

    /// Expiration date, strictly in the future at registration time.
    #[ts(as = "String")]
    pub expiration_date: DateTime<Utc>,

    /// When the document was created.
    #[serde(default = "default_created_at")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

fn default_created_at() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

impl Product {
    /// True when every user-facing field carries a real value.
    ///
    /// Numeric fields and dates are already guaranteed by the types; this
    /// only needs to reject empty strings, which deserialize fine but mean
    /// the field was never filled in.
    pub fn is_complete(&self) -> bool {
        !self.product_name.is_empty()
            && !self.brand.is_empty()
            && !self.barcode.is_empty()
            && !self.category.is_empty()
    }

    /// The label to count this product under in inventory summaries.
    pub fn category_bucket(&self) -> &str {
        if self.category.is_empty() {
            crate::category::UNCATEGORIZED_LABEL
        } else {
            &self.category
        }
    }
}

// =============================================================================
// NewProduct (create payload)
// =============================================================================

/// A fully validated product ready to be written to the store.
///
/// The registration flow obtains one from
/// [`crate::validation::validate_form`], so there every field rule and the
/// cross-field price rule held at the moment of validation. The
/// duplicate-barcode check is NOT covered; it needs the store and happens
/// in the registration flow.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub product_name: String,
    pub brand: String,
    pub stock: i64,
    pub category: Category,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub barcode: String,
    #[ts(as = "String")]
    pub expiration_date: DateTime<Utc>,
}

// =============================================================================
// ProductForm (editing state)
// =============================================================================

/// The registration form as the user edits it.
///
/// Fields hold sanitized text, not typed values; validation happens
/// separately so the whole form can be judged at once. Setters apply the
/// matching sanitizer on every change, which is what keeps garbage out of
/// the field in the first place.
///
/// ## Example
/// ```rust
/// use bodega_core::types::ProductForm;
///
/// let mut form = ProductForm::new();
/// form.set_product_name("Atún en agua #3");
/// form.set_stock("12 pcs");
///
/// assert_eq!(form.product_name(), "Atún en agua");
/// assert_eq!(form.stock_text(), "12");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    product_name: String,
    brand: String,
    stock: String,
    category: String,
    purchase_price: String,
    sale_price: String,
    barcode: String,
    expiration_date: Option<NaiveDate>,
}

impl ProductForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        ProductForm::default()
    }

    /// Sets the product name through the name sanitizer.
    pub fn set_product_name(&mut self, raw: &str) {
        self.product_name = sanitize_name(raw);
    }

    /// Sets the brand through the name sanitizer.
    pub fn set_brand(&mut self, raw: &str) {
        self.brand = sanitize_name(raw);
    }

    /// Sets the stock text through the integer sanitizer.
    pub fn set_stock(&mut self, raw: &str) {
        self.stock = sanitize_integer(raw);
    }

    /// Sets the category label as picked (picker values need no cleaning).
    pub fn set_category(&mut self, label: &str) {
        self.category = label.to_string();
    }

    /// Sets the purchase price text through the decimal sanitizer.
    pub fn set_purchase_price(&mut self, raw: &str) {
        self.purchase_price = sanitize_decimal(raw);
    }

    /// Sets the sale price text through the decimal sanitizer.
    pub fn set_sale_price(&mut self, raw: &str) {
        self.sale_price = sanitize_decimal(raw);
    }

    /// Stores a scanned barcode. Scans are the only way a barcode gets set;
    /// there is no free-text entry path.
    pub fn set_barcode(&mut self, code: impl Into<String>) {
        self.barcode = code.into();
    }

    /// Clears the barcode (used when a scan is rejected).
    pub fn clear_barcode(&mut self) {
        self.barcode.clear();
    }

    /// Sets the expiration date as picked.
    pub fn set_expiration_date(&mut self, date: NaiveDate) {
        self.expiration_date = Some(date);
    }

    /// Resets every field to its initial state.
    pub fn clear(&mut self) {
        *self = ProductForm::default();
    }

    // ===== Getters =====

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn stock_text(&self) -> &str {
        &self.stock
    }

    pub fn category_label(&self) -> &str {
        &self.category
    }

    pub fn purchase_price_text(&self) -> &str {
        &self.purchase_price
    }

    pub fn sale_price_text(&self) -> &str {
        &self.sale_price
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn has_barcode(&self) -> bool {
        !self.barcode.is_empty()
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> serde_json::Value {
        serde_json::json!({
            "productName": "Atún en agua",
            "brand": "Dolores",
            "stock": 12,
            "category": "Alimentos y Bebidas",
            "purchasePrice": 8.5,
            "salePrice": 10.99,
            "barcode": "7501000000012",
            "expirationDate": "2027-03-01T00:00:00Z"
        })
    }

    #[test]
    fn test_product_deserializes_from_wire_body() {
        let product: Product = serde_json::from_value(full_body()).unwrap();

        assert_eq!(product.id, ""); // body carries no id
        assert_eq!(product.product_name, "Atún en agua");
        assert_eq!(product.purchase_price.cents(), 850);
        assert_eq!(product.sale_price.cents(), 1099);
        assert_eq!(product.created_at, DateTime::UNIX_EPOCH);
        assert!(product.is_complete());
    }

    #[test]
    fn test_product_accepts_unknown_category_label() {
        let mut body = full_body();
        body["category"] = serde_json::json!("Electrónica");

        let product: Product = serde_json::from_value(body).unwrap();
        assert!(product.is_complete());
        assert_eq!(product.category_bucket(), "Electrónica");
    }

    #[test]
    fn test_empty_strings_make_product_incomplete() {
        let mut body = full_body();
        body["brand"] = serde_json::json!("");

        let product: Product = serde_json::from_value(body).unwrap();
        assert!(!product.is_complete());
    }

    #[test]
    fn test_empty_category_maps_to_uncategorized_bucket() {
        let mut body = full_body();
        body["category"] = serde_json::json!("");

        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.category_bucket(), "Sin categoría");
    }

    #[test]
    fn test_stringly_typed_price_is_rejected() {
        let mut body = full_body();
        body["salePrice"] = serde_json::json!("10.99");

        assert!(serde_json::from_value::<Product>(body).is_err());
    }

    #[test]
    fn test_new_product_serializes_with_wire_keys() {
        let new_product = NewProduct {
            product_name: "Jugo de naranja".to_string(),
            brand: "Del Valle".to_string(),
            stock: 24,
            category: Category::FoodAndDrinks,
            purchase_price: Money::from_cents(1450),
            sale_price: Money::from_cents(1899),
            barcode: "7501000000029".to_string(),
            expiration_date: "2027-01-15T00:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&new_product).unwrap();
        assert_eq!(json["productName"], "Jugo de naranja");
        assert_eq!(json["category"], "Alimentos y Bebidas");
        assert_eq!(json["purchasePrice"], serde_json::json!(14.5));
        assert_eq!(json["salePrice"], serde_json::json!(18.99));
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_form_setters_sanitize() {
        let mut form = ProductForm::new();
        form.set_product_name("Coca-Cola 600ml!!");
        form.set_brand("  The   Coca  Cola  Company  Inc  Global  Extra ");
        form.set_stock("12x");
        form.set_purchase_price("$8.509");
        form.set_sale_price("10.9.9");

        assert_eq!(form.product_name(), "CocaCola ml");
        assert_eq!(form.brand(), "The Coca Cola Company Inc Global");
        assert_eq!(form.stock_text(), "12");
        assert_eq!(form.purchase_price_text(), "8.50");
        assert_eq!(form.sale_price_text(), "10.99");
    }

    #[test]
    fn test_form_barcode_is_scan_only_state() {
        let mut form = ProductForm::new();
        assert!(!form.has_barcode());

        form.set_barcode("7501000000036");
        assert!(form.has_barcode());

        form.clear_barcode();
        assert_eq!(form.barcode(), "");
    }

    #[test]
    fn test_form_clear_resets_everything() {
        let mut form = ProductForm::new();
        form.set_product_name("Pan");
        form.set_stock("3");
        form.set_barcode("123");
        form.set_expiration_date(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());

        form.clear();
        assert_eq!(form, ProductForm::new());
        assert!(form.expiration_date().is_none());
    }
}
