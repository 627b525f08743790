//! # Live Inventory Snapshots
//!
//! Turns raw document snapshots into what the home screen shows.
//!
//! ## Counting Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Snapshot Counts                           │
//! │                                                                         │
//! │  all documents ──► complete products     (listed, searchable)          │
//! │                └─► incomplete documents  (counted, flagged)            │
//! │                                                                         │
//! │  product_count    = complete + incomplete                              │
//! │  category_counts  = every document, bucketed by its category label;    │
//! │                     blank or missing labels land in "Sin categoría"    │
//! │                                                                         │
//! │  Half-written documents still sit on the shelf. Dropping them from     │
//! │  the counts would make the app disagree with a physical count.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Snapshots arrive through [`InventoryFeed`], one per store mutation,
//! starting with the current contents.

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use bodega_core::{Product, UNCATEGORIZED_LABEL};
use bodega_store::{partition_complete, ChangeFeed, Document, DocumentStore, ProductRepository};

use crate::error::FlowError;

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// Everything the home screen derives from one document snapshot.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySnapshot {
    /// Complete products, in creation order.
    pub products: Vec<Product>,

    /// Documents that did not decode into a complete product.
    pub incomplete: Vec<Document>,

    /// Total documents, complete or not.
    pub product_count: usize,

    /// Documents per category label, sorted by label.
    pub category_counts: BTreeMap<String, usize>,
}

impl InventorySnapshot {
    /// Builds a snapshot from one collection's documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let (products, incomplete) = partition_complete(documents);

        let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
        for product in &products {
            *category_counts
                .entry(product.category_bucket().to_string())
                .or_insert(0) += 1;
        }
        for document in &incomplete {
            let bucket = document
                .get_str("category")
                .filter(|label| !label.is_empty())
                .unwrap_or(UNCATEGORIZED_LABEL);
            *category_counts.entry(bucket.to_string()).or_insert(0) += 1;
        }

        let product_count = products.len() + incomplete.len();
        InventorySnapshot {
            products,
            incomplete,
            product_count,
            category_counts,
        }
    }

    /// Number of distinct category buckets in use.
    pub fn category_count(&self) -> usize {
        self.category_counts.len()
    }

    /// True when the store holds no product documents at all.
    pub fn is_empty(&self) -> bool {
        self.product_count == 0
    }
}

// =============================================================================
// Inventory Feed
// =============================================================================

/// Live inventory snapshots, one per store mutation.
///
/// ## Usage
/// ```rust,ignore
/// let mut feed = InventoryFeed::open(&repo).await?;
/// while let Some(snapshot) = feed.next().await {
///     render_home_screen(&snapshot);
/// }
/// ```
#[derive(Debug)]
pub struct InventoryFeed {
    feed: ChangeFeed,
}

impl InventoryFeed {
    /// Opens a feed over the product collection.
    ///
    /// The first item is the current contents; later items follow
    /// mutations. A slow consumer skips to the latest snapshot rather
    /// than queueing stale ones.
    pub async fn open<S: DocumentStore>(
        repo: &ProductRepository<S>,
    ) -> Result<Self, FlowError> {
        Ok(InventoryFeed {
            feed: repo.watch().await?,
        })
    }

    /// Waits for the next snapshot.
    pub async fn next(&mut self) -> Option<InventorySnapshot> {
        self.feed.next().await.map(InventorySnapshot::from_documents)
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

    fn new_product(name: &str, barcode: &str, category: Category) -> NewProduct {
        NewProduct {
            product_name: name.to_string(),
            brand: "Dolores".to_string(),
            stock: 12,
            category,
            purchase_price: Money::from_cents(850),
            sale_price: Money::from_cents(1099),
            barcode: barcode.to_string(),
            expiration_date: Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_snapshot_counts_every_document() {
        let store = MemoryStore::default();
        let repo = ProductRepository::new(store.clone());

        repo.insert(&new_product(
            "Atún en agua",
            "7501031311309",
            Category::FoodAndDrinks,
        ))
        .await
        .unwrap();
        repo.insert(&new_product("Audífonos Bocina", "7502223334445", Category::Technology))
            .await
            .unwrap();

        // Half-written documents: one with a category, one without
        store
            .create(
                PRODUCTS_COLLECTION,
                json!({ "productName": "Vitaminas", "category": "Salud" }),
            )
            .await
            .unwrap();
        store
            .create(PRODUCTS_COLLECTION, json!({ "stock": 3 }))
            .await
            .unwrap();

        let documents = store.fetch_all(PRODUCTS_COLLECTION).await.unwrap();
        let snapshot = InventorySnapshot::from_documents(documents);

        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.incomplete.len(), 2);
        assert_eq!(snapshot.product_count, 4);
        assert_eq!(snapshot.category_count(), 4);
        assert_eq!(snapshot.category_counts["Alimentos y Bebidas"], 1);
        assert_eq!(snapshot.category_counts["Tecnología"], 1);
        assert_eq!(snapshot.category_counts["Salud"], 1);
        assert_eq!(snapshot.category_counts["Sin categoría"], 1);
    }

    #[tokio::test]
    async fn test_blank_category_label_counts_as_uncategorized() {
        let store = MemoryStore::default();
        store
            .create(
                PRODUCTS_COLLECTION,
                json!({ "productName": "Misterio", "category": "" }),
            )
            .await
            .unwrap();

        let documents = store.fetch_all(PRODUCTS_COLLECTION).await.unwrap();
        let snapshot = InventorySnapshot::from_documents(documents);

        assert_eq!(snapshot.category_counts["Sin categoría"], 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = InventorySnapshot::from_documents(Vec::new());

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.product_count, 0);
        assert_eq!(snapshot.category_count(), 0);
    }

    #[tokio::test]
    async fn test_feed_starts_with_current_contents_and_tracks_mutations() {
        let store = MemoryStore::default();
        let repo = ProductRepository::new(store.clone());
        repo.insert(&new_product(
            "Atún en agua",
            "7501031311309",
            Category::FoodAndDrinks,
        ))
        .await
        .unwrap();

        let mut feed = InventoryFeed::open(&repo).await.unwrap();

        let first = feed.next().await.unwrap();
        assert_eq!(first.product_count, 1);

        repo.insert(&new_product("Leche entera", "7502223334445", Category::FoodAndDrinks))
            .await
            .unwrap();
        let second = feed.next().await.unwrap();
        assert_eq!(second.product_count, 2);
        assert_eq!(second.category_counts["Alimentos y Bebidas"], 2);

        // An incomplete write still moves the counts
        store
            .create(PRODUCTS_COLLECTION, json!({ "stock": 1 }))
            .await
            .unwrap();
        let third = feed.next().await.unwrap();
        assert_eq!(third.product_count, 3);
        assert_eq!(third.incomplete.len(), 1);
    }
}
