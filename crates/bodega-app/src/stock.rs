//! # Stock Adjustment
//!
//! Applies signed stock changes to a registered product.
//!
//! ## Adjustment Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Adjustment Rules                             │
//! │                                                                         │
//! │  quantity text ──► positive integer check (same rule as the form)      │
//! │       │                                                                 │
//! │       ├─ junk ("1.5", "-3", "0", "") ──► INVALID_QUANTITY, no write    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Increase: new = stock + quantity                                       │
//! │  Decrease: quantity ≤ stock - 1, else STOCK_LIMIT                       │
//! │                                                                         │
//! │  Stock can never reach zero through a decrease. A product with no      │
//! │  units left is deleted, not zeroed; zero would hide it in counts       │
//! │  while keeping it sellable.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use bodega_core::{validation::validate_positive_integer, Product};
use bodega_store::{DocumentStore, ProductRepository};

use crate::error::FlowError;

/// Which direction a stock adjustment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    /// Units arrived; add them.
    Increase,

    /// Units left (sold, spoiled); remove them.
    Decrease,
}

/// Applies stock adjustments on top of a repository.
#[derive(Debug, Clone)]
pub struct StockAdjuster<S> {
    repo: ProductRepository<S>,
}

impl<S: DocumentStore> StockAdjuster<S> {
    /// Creates an adjuster over the given repository.
    pub fn new(repo: ProductRepository<S>) -> Self {
        StockAdjuster { repo }
    }

    /// Adjusts a product's stock and returns the new level.
    ///
    /// `quantity_text` is the raw modal input; it must be a positive
    /// integer by the same rule the registration form applies to stock.
    /// Invalid input fails before the store is touched.
    ///
    /// Decreases are capped at `stock - 1` so the level never reaches
    /// zero. The write is field-level: only `stock` changes, concurrent
    /// edits to other fields survive.
    pub async fn adjust(
        &self,
        product: &Product,
        action: StockAction,
        quantity_text: &str,
    ) -> Result<i64, FlowError> {
        let quantity = validate_positive_integer("quantity", quantity_text)
            .map_err(|err| FlowError::invalid_quantity(err.to_string()))?;

        let new_stock = match action {
            StockAction::Increase => product
                .stock
                .checked_add(quantity)
                .ok_or_else(|| FlowError::invalid_quantity("Quantity is too large"))?,
            StockAction::Decrease => {
                let max_decrease = product.stock - 1;
                if quantity > max_decrease {
                    return Err(FlowError::stock_limit(max_decrease));
                }
                product.stock - quantity
            }
        };

        self.repo.set_stock(&product.id, new_stock).await?;

        debug!(
            id = %product.id,
            old_stock = product.stock,
            new_stock,
            "Stock adjusted"
        );
        Ok(new_stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bodega_core::{Category, Money, NewProduct};
    use bodega_store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn new_product(stock: i64) -> NewProduct {
        NewProduct {
            product_name: "Atún en agua".to_string(),
            brand: "Dolores".to_string(),
            stock,
            category: Category::FoodAndDrinks,
            purchase_price: Money::from_cents(850),
            sale_price: Money::from_cents(1099),
            barcode: "7501031311309".to_string(),
            expiration_date: Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    /// Registers a product with the given stock and returns the pieces
    /// the adjustment screen would hold.
    async fn adjuster_with_stock(
        stock: i64,
    ) -> (MemoryStore, ProductRepository<MemoryStore>, Product) {
        let store = MemoryStore::default();
        let repo = ProductRepository::new(store.clone());
        let id = repo.insert(&new_product(stock)).await.unwrap();
        let product = repo.get(&id).await.unwrap().unwrap();
        (store, repo, product)
    }

    #[tokio::test]
    async fn test_increase_adds_units() {
        let (_, repo, product) = adjuster_with_stock(5).await;
        let adjuster = StockAdjuster::new(repo.clone());

        let new_stock = adjuster
            .adjust(&product, StockAction::Increase, "3")
            .await
            .unwrap();

        assert_eq!(new_stock, 8);
        assert_eq!(repo.get(&product.id).await.unwrap().unwrap().stock, 8);
    }

    #[tokio::test]
    async fn test_decrease_can_reach_one_unit() {
        let (_, repo, product) = adjuster_with_stock(5).await;
        let adjuster = StockAdjuster::new(repo.clone());

        let new_stock = adjuster
            .adjust(&product, StockAction::Decrease, "4")
            .await
            .unwrap();

        assert_eq!(new_stock, 1);
        assert_eq!(repo.get(&product.id).await.unwrap().unwrap().stock, 1);
    }

    #[tokio::test]
    async fn test_decrease_to_zero_is_rejected() {
        let (_, repo, product) = adjuster_with_stock(5).await;
        let adjuster = StockAdjuster::new(repo.clone());

        let err = adjuster
            .adjust(&product, StockAction::Decrease, "5")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StockLimit);
        assert!(err.message.contains('4'));

        // Stock untouched
        assert_eq!(repo.get(&product.id).await.unwrap().unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_junk_quantities_never_reach_the_store() {
        let (store, repo, product) = adjuster_with_stock(5).await;
        let adjuster = StockAdjuster::new(repo.clone());

        // Arm a one-shot write fault. If any junk input reached the
        // store, it would consume the fault and the final adjust below
        // would succeed, failing this test.
        store.fail_next_write();

        for junk in ["", "  ", "0", "-3", "1.5", "abc"] {
            let err = adjuster
                .adjust(&product, StockAction::Increase, junk)
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidQuantity, "input {:?}", junk);
        }

        let err = adjuster
            .adjust(&product, StockAction::Increase, "1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreWriteFailed);
    }

    #[tokio::test]
    async fn test_rejected_decrease_never_reaches_the_store() {
        let (store, repo, product) = adjuster_with_stock(3).await;
        let adjuster = StockAdjuster::new(repo.clone());

        store.fail_next_write();

        let err = adjuster
            .adjust(&product, StockAction::Decrease, "3")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StockLimit);

        // The armed fault is still there for the first real write
        let err = adjuster
            .adjust(&product, StockAction::Decrease, "1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreWriteFailed);
    }

    #[tokio::test]
    async fn test_adjusting_missing_product_reports_not_found() {
        let (_, repo, product) = adjuster_with_stock(5).await;
        let adjuster = StockAdjuster::new(repo.clone());

        repo.remove(&product.id).await.unwrap();

        let err = adjuster
            .adjust(&product, StockAction::Increase, "1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
