//! # Product Repository
//!
//! Document operations for products.
//!
//! ## Key Operations
//! - Insert of validated products (store assigns the id)
//! - Complete-product reads, incomplete documents filtered out
//! - Barcode duplicate lookup
//! - Single-field stock updates
//!
//! ## Completeness Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Why Reads Filter Documents                             │
//! │                                                                         │
//! │  "productos" collection                                                 │
//! │                                                                         │
//! │  { productName: "Atún", brand: "Dolores", stock: 12, ... }  ← complete │
//! │  { productName: "Pan" }                        ← old app version wrote │
//! │  { productName: "Leche", brand: "", ... }      ← blank required field  │
//! │                                                                         │
//! │  list() → [Atún]          partial records never crash a screen;        │
//! │                           they are skipped and logged                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use bodega_core::{NewProduct, Product};

use crate::document::partition_complete;
use crate::error::StoreResult;
use crate::store::{ChangeFeed, DocumentStore};

/// Collection name shared by every app version that ever wrote products.
pub const PRODUCTS_COLLECTION: &str = "productos";

/// Repository for product document operations.
///
/// Generic over the store so flows run identically against SQLite and
/// the in-memory test backend.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(store);
///
/// let id = repo.insert(&new_product).await?;
/// let product = repo.get(&id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: DocumentStore> ProductRepository<S> {
    /// Creates a new ProductRepository.
    pub fn new(store: S) -> Self {
        ProductRepository { store }
    }

    /// Inserts a validated product and returns its store-assigned id.
    ///
    /// Stamps a `createdAt` timestamp into the body so listings can
    /// keep a stable oldest-first order.
    pub async fn insert(&self, product: &NewProduct) -> StoreResult<String> {
        debug!(barcode = %product.barcode, "Inserting product");

        let mut body = serde_json::to_value(product)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("createdAt".to_string(), json!(Utc::now()));
        }

        self.store.create(PRODUCTS_COLLECTION, body).await
    }

    /// Gets a complete product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Document exists and is complete
    /// * `Ok(None)` - Document missing, incomplete, or unreadable
    pub async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let document = self.store.fetch(PRODUCTS_COLLECTION, id).await?;

        match document {
            Some(document) => match document.to_product() {
                Ok(product) if product.is_complete() => Ok(Some(product)),
                _ => {
                    debug!(id = %document.id, "Skipping incomplete product document");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Lists all complete products, oldest first.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let documents = self.store.fetch_all(PRODUCTS_COLLECTION).await?;
        let total = documents.len();

        let (products, incomplete) = partition_complete(documents);
        if !incomplete.is_empty() {
            debug!(
                skipped = incomplete.len(),
                total, "Skipped incomplete product documents"
            );
        }

        Ok(products)
    }

    /// True when any document already carries this barcode.
    ///
    /// Incomplete documents count too: their barcode is just as taken.
    pub async fn barcode_in_use(&self, barcode: &str) -> StoreResult<bool> {
        let matches = self
            .store
            .query_eq(PRODUCTS_COLLECTION, "barcode", &json!(barcode))
            .await?;

        Ok(!matches.is_empty())
    }

    /// Writes an absolute stock level, touching no other field.
    ///
    /// Field-level write: concurrent edits to other fields survive.
    pub async fn set_stock(&self, id: &str, stock: i64) -> StoreResult<()> {
        debug!(id = %id, stock = %stock, "Setting product stock");

        self.store
            .update_fields(PRODUCTS_COLLECTION, id, json!({ "stock": stock }))
            .await
    }

    /// Deletes a product document.
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        self.store.delete(PRODUCTS_COLLECTION, id).await
    }

    /// Opens a live feed over the product collection.
    pub async fn watch(&self) -> StoreResult<ChangeFeed> {
        self.store.subscribe(PRODUCTS_COLLECTION).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use bodega_core::{Category, Money};
    use chrono::TimeZone;

    fn repo() -> ProductRepository<MemoryStore> {
        ProductRepository::new(MemoryStore::new())
    }

    fn new_product(barcode: &str) -> NewProduct {
        NewProduct {
            product_name: "Atún en agua".to_string(),
            brand: "Dolores".to_string(),
            stock: 12,
            category: Category::FoodAndDrinks,
            purchase_price: Money::from_cents(850),
            sale_price: Money::from_cents(1099),
            barcode: barcode.to_string(),
            expiration_date: Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_stamps_created_at_and_round_trips() {
        let repo = repo();
        let id = repo.insert(&new_product("7501")).await.unwrap();

        let product = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.product_name, "Atún en agua");
        assert_eq!(product.sale_price, Money::from_cents(1099));
        assert!(product.created_at > chrono::DateTime::UNIX_EPOCH);
    }

    #[tokio::test]
    async fn test_list_filters_incomplete_documents() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(store.clone());

        repo.insert(&new_product("7501")).await.unwrap();
        store
            .create(PRODUCTS_COLLECTION, json!({ "productName": "Pan" }))
            .await
            .unwrap();

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].barcode, "7501");
    }

    #[tokio::test]
    async fn test_barcode_in_use_counts_incomplete_documents() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(store.clone());

        store
            .create(PRODUCTS_COLLECTION, json!({ "barcode": "7501" }))
            .await
            .unwrap();

        assert!(repo.barcode_in_use("7501").await.unwrap());
        assert!(!repo.barcode_in_use("9999").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_stock_touches_only_stock() {
        let repo = repo();
        let id = repo.insert(&new_product("7501")).await.unwrap();

        repo.set_stock(&id, 4).await.unwrap();

        let product = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(product.stock, 4);
        assert_eq!(product.brand, "Dolores");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = repo();
        assert!(repo.get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_watch_sees_inserts() {
        let repo = repo();
        let mut feed = repo.watch().await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());

        repo.insert(&new_product("7501")).await.unwrap();
        assert_eq!(feed.next().await.unwrap().len(), 1);
    }
}
