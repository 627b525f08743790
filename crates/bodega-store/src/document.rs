//! # Document Type
//!
//! Schemaless documents as the store sees them.
//!
//! ## Documents vs Products
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  What the Store Actually Holds                          │
//! │                                                                         │
//! │  Document { id, body: JSON }     ← every stored record, no schema      │
//! │        │                                                                │
//! │        │ to_product()                                                   │
//! │        ▼                                                                │
//! │  Product (typed read model)      ← only bodies that parse              │
//! │        │                                                                │
//! │        │ is_complete()                                                  │
//! │        ▼                                                                │
//! │  "complete" vs "incomplete"      ← inventory shows complete products,  │
//! │                                    keeps incomplete docs for diagnosis │
//! │                                                                         │
//! │  Old app versions wrote partial bodies; they must load, not crash.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bodega_core::types::Product;
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Document
// =============================================================================

/// A stored record: an id plus an arbitrary JSON body.
///
/// The id is assigned by the store and lives OUTSIDE the body, matching
/// how document databases address records.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Document {
    /// Store-assigned identifier, unique within its collection.
    pub id: String,

    /// The raw JSON body as written.
    #[ts(type = "unknown")]
    pub body: Value,
}

impl Document {
    /// Creates a document from its parts.
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Document {
            id: id.into(),
            body,
        }
    }

    /// Parses the body into a typed [`Product`], patching in the id.
    ///
    /// ## Errors
    /// Returns [`StoreError::Serialization`] when the body does not have
    /// the product shape (missing fields, wrong types).
    pub fn to_product(&self) -> StoreResult<Product> {
        let mut product: Product = serde_json::from_value(self.body.clone())?;
        product.id = self.id.clone();
        Ok(product)
    }

    /// Reads a top-level string field from the raw body.
    ///
    /// Used for fields of incomplete documents, which have no typed form.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

// =============================================================================
// Partition
// =============================================================================

/// Splits a collection snapshot into complete products and leftovers.
///
/// A document counts as complete when its body parses as a [`Product`] AND
/// every user-facing field carries a real value. Everything else lands in
/// the incomplete bucket with its raw body intact.
pub fn partition_complete(documents: Vec<Document>) -> (Vec<Product>, Vec<Document>) {
    let mut products = Vec::with_capacity(documents.len());
    let mut incomplete = Vec::new();

    for document in documents {
        match document.to_product() {
            Ok(product) if product.is_complete() => products.push(product),
            _ => incomplete.push(document),
        }
    }

    (products, incomplete)
}

// =============================================================================
// Field Merge
// =============================================================================

/// Shallow-merges `fields` into `body`, as a field-level update does.
///
/// Both values must be JSON objects; keys in `fields` replace keys in
/// `body`, untouched keys survive.
pub(crate) fn merge_fields(body: &mut Value, fields: &Value) -> StoreResult<()> {
    match (body.as_object_mut(), fields.as_object()) {
        (Some(target), Some(updates)) => {
            for (key, value) in updates {
                target.insert(key.clone(), value.clone());
            }
            Ok(())
        }
        _ => Err(StoreError::write_failed(
            "update payload and document body must be JSON objects",
        )),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> Value {
        json!({
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
    fn test_to_product_patches_id() {
        let document = Document::new("doc-1", full_body());
        let product = document.to_product().unwrap();

        assert_eq!(product.id, "doc-1");
        assert_eq!(product.product_name, "Atún en agua");
    }

    #[test]
    fn test_to_product_rejects_wrong_shape() {
        let document = Document::new("doc-1", json!({ "productName": "Pan" }));
        assert!(matches!(
            document.to_product(),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_partition_complete() {
        let mut empty_brand = full_body();
        empty_brand["brand"] = json!("");

        let documents = vec![
            Document::new("ok", full_body()),
            Document::new("partial", json!({ "productName": "Pan", "barcode": "123" })),
            Document::new("blank-brand", empty_brand),
        ];

        let (products, incomplete) = partition_complete(documents);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "ok");
        assert_eq!(incomplete.len(), 2);
        assert_eq!(incomplete[0].id, "partial");
        assert_eq!(incomplete[0].get_str("productName"), Some("Pan"));
        assert_eq!(incomplete[1].id, "blank-brand");
    }

    #[test]
    fn test_merge_fields_is_shallow_and_keeps_others() {
        let mut body = full_body();
        merge_fields(&mut body, &json!({ "stock": 4 })).unwrap();

        assert_eq!(body["stock"], json!(4));
        assert_eq!(body["brand"], json!("Dolores"));
    }

    #[test]
    fn test_merge_fields_rejects_non_objects() {
        let mut body = full_body();
        assert!(merge_fields(&mut body, &json!(42)).is_err());

        let mut not_object = json!("plain");
        assert!(merge_fields(&mut not_object, &json!({ "stock": 4 })).is_err());
    }
}
