//! # bodega-store: Persistence Layer for Bodega
//!
//! This crate stores the product catalog as schemaless JSON documents.
//! It uses SQLite for local storage with sqlx for async operations, plus
//! an in-memory backend behind the same trait for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bodega Data Flow                                │
//! │                                                                         │
//! │  Flow (bodega-app: registration, stock, inventory)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bodega-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ DocumentStore │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqliteStore   │◄───│ ProductRepo   │    │ 001_docs.sql │  │   │
//! │  │   │ MemoryStore   │    │ typed access  │    │              │  │   │
//! │  │   │ ChangeFeed    │    │ + filtering   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   documents(collection, id, body JSON, created_at)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `DocumentStore` trait and live `ChangeFeed`
//! - [`sqlite`] - SQLite backend and pool configuration
//! - [`memory`] - In-memory backend with test hooks
//! - [`document`] - Raw documents and the completeness partition
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Store error types
//! - [`repository`] - Typed product access
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bodega_store::{ProductRepository, SqliteStore, StoreConfig};
//!
//! // Open the store (runs migrations)
//! let store = SqliteStore::new(StoreConfig::new("path/to/bodega.db")).await?;
//!
//! // Typed product access
//! let repo = ProductRepository::new(store);
//! let id = repo.insert(&new_product).await?;
//! let catalog = repo.list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod repository;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{partition_complete, Document};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreConfig};
pub use store::{ChangeFeed, DocumentStore};

// Repository re-exports for convenience
pub use repository::product::{ProductRepository, PRODUCTS_COLLECTION};
