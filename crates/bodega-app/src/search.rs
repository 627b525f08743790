//! # Catalog Search
//!
//! Case-insensitive product search over names and barcodes.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Search Behavior                                 │
//! │                                                                         │
//! │  query: "  AtÚ "                                                        │
//! │     │                                                                   │
//! │     ├─ trim + lowercase ──► "atú"                                       │
//! │     │                                                                   │
//! │     ├─ shorter than 2 chars? ──► empty result, store never touched     │
//! │     │                                                                   │
//! │     └─ match each complete product:                                    │
//! │          name CONTAINS query   ("Atún en agua" ✓)                      │
//! │          OR barcode STARTS WITH query                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names match anywhere in the string; barcodes only match as a prefix,
//! because people read barcodes off a label left to right.

use tracing::debug;

use bodega_core::Product;
use bodega_store::{DocumentStore, ProductRepository};

use crate::error::FlowError;

/// Minimum query length (in characters) before the store is consulted.
///
/// A single character matches half the catalog, which is noise, not a
/// search result. Below this the result is empty and free.
pub const MIN_QUERY_LEN: usize = 2;

/// Product search over the catalog.
#[derive(Debug, Clone)]
pub struct ProductSearch<S> {
    repo: ProductRepository<S>,
}

impl<S: DocumentStore> ProductSearch<S> {
    /// Creates a search over the given repository.
    pub fn new(repo: ProductRepository<S>) -> Self {
        ProductSearch { repo }
    }

    /// Runs one search.
    ///
    /// Queries are trimmed and lowercased before matching. Queries under
    /// [`MIN_QUERY_LEN`] characters return an empty result without a
    /// store read. Only complete products are searched; half-written
    /// documents never show up as results.
    pub async fn search(&self, raw_query: &str) -> Result<Vec<Product>, FlowError> {
        let query = raw_query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let products = self.repo.list().await?;
        let matches: Vec<Product> = products
            .into_iter()
            .filter(|product| {
                product.product_name.to_lowercase().contains(&query)
                    || product.barcode.starts_with(&query)
            })
            .collect();

        debug!(query = %query, matches = matches.len(), "Product search complete");
        Ok(matches)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_core::{Category, Money, NewProduct};
    use bodega_store::{MemoryStore, PRODUCTS_COLLECTION};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn new_product(name: &str, barcode: &str) -> NewProduct {
        NewProduct {
            product_name: name.to_string(),
            brand: "Dolores".to_string(),
            stock: 12,
            category: Category::FoodAndDrinks,
            purchase_price: Money::from_cents(850),
            sale_price: Money::from_cents(1099),
            barcode: barcode.to_string(),
            expiration_date: Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    async fn seeded() -> (MemoryStore, ProductSearch<MemoryStore>) {
        let store = MemoryStore::default();
        let repo = ProductRepository::new(store.clone());

        repo.insert(&new_product("Atún en agua", "7501031311309"))
            .await
            .unwrap();
        repo.insert(&new_product("Leche entera", "7502223334445"))
            .await
            .unwrap();
        repo.insert(&new_product("Atole de vainilla", "7503334445556"))
            .await
            .unwrap();

        // A half-written document that must never surface in results
        store
            .create(
                PRODUCTS_COLLECTION,
                json!({ "productName": "Atún incompleto", "stock": 1 }),
            )
            .await
            .unwrap();

        (store, ProductSearch::new(repo))
    }

    #[tokio::test]
    async fn test_short_query_skips_the_store() {
        let (store, search) = seeded().await;
        let reads_before = store.read_calls();

        assert!(search.search("a").await.unwrap().is_empty());
        assert!(search.search("  z  ").await.unwrap().is_empty());
        assert!(search.search("").await.unwrap().is_empty());

        assert_eq!(store.read_calls(), reads_before);
    }

    #[tokio::test]
    async fn test_matches_name_case_insensitive() {
        let (_, search) = seeded().await;

        let results = search.search("ATÚN").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product_name, "Atún en agua");
    }

    #[tokio::test]
    async fn test_matches_substring_of_name() {
        let (_, search) = seeded().await;

        let results = search.search("vainilla").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product_name, "Atole de vainilla");
    }

    #[tokio::test]
    async fn test_matches_barcode_prefix_only() {
        let (_, search) = seeded().await;

        let results = search.search("7502").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product_name, "Leche entera");

        // Mid-barcode digits do not match
        assert!(search.search("2233").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let (_, search) = seeded().await;

        let results = search.search("  LECHE  ").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_documents_never_match() {
        let (_, search) = seeded().await;

        // "atún" appears in a complete and an incomplete document; only
        // the complete one may come back
        let results = search.search("atún").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product_name, "Atún en agua");
    }
}
