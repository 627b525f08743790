//! # bodega-app: Application Flows for Bodega Inventory
//!
//! This crate drives the user-facing flows: registering products off a
//! barcode scan, adjusting stock, searching the catalog, and feeding the
//! home screen live inventory counts.
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
//! │  │                ★ bodega-app (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌───────────┐ ┌─────────┐ ┌──────────────┐  │   │
//! │  │  │ registration │ │  scanner  │ │  stock  │ │    search    │  │   │
//! │  │  │ scan + save  │ │ sessions  │ │ adjust  │ │ name/barcode │  │   │
//! │  │  └──────────────┘ └───────────┘ └─────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌───────────┐ ┌─────────────────────────┐   │   │
//! │  │  │  inventory   │ │  config   │ │         error           │   │   │
//! │  │  │ live counts  │ │ TOML+env  │ │  FlowError envelope     │   │   │
//! │  │  └──────────────┘ └───────────┘ └─────────────────────────┘   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   bodega-core (rules)        bodega-store (documents, feeds)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - App configuration (TOML file + environment overrides)
//! - [`error`] - The [`FlowError`] envelope the frontend receives
//! - [`inventory`] - Live inventory snapshots with per-category counts
//! - [`registration`] - The scan-edit-validate-save registration flow
//! - [`scanner`] - Camera read dedup and format filtering
//! - [`search`] - Case-insensitive catalog search
//! - [`stock`] - Stock increase/decrease with the never-zero rule
//!
//! ## Usage
//! ```rust,ignore
//! use bodega_app::{AppConfig, InventoryFeed, RegistrationFlow};
//! use bodega_store::{ProductRepository, SqliteStore};
//!
//! let config = AppConfig::load_or_default(None);
//! let store = SqliteStore::new(config.store_config()).await?;
//! let repo = ProductRepository::new(store);
//!
//! let mut flow = RegistrationFlow::new(repo.clone())
//!     .with_success_display(config.success_display());
//! let mut session = config.new_scan_session();
//!
//! // Camera events flow in; a unique code lands on the form
//! flow.apply_scan(&mut session, "ean13", "7501031311309").await?;
//! flow.set_product_name("Atún en agua");
//! // ... remaining fields ...
//! let id = flow.save(today).await?;
//!
//! // Meanwhile the home screen watches inventory
//! let mut feed = InventoryFeed::open(&repo).await?;
//! while let Some(snapshot) = feed.next().await {
//!     println!("{} products", snapshot.product_count);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod inventory;
pub mod registration;
pub mod scanner;
pub mod search;
pub mod stock;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::AppConfig;
pub use error::{ConfigError, ErrorCode, FlowError};
pub use inventory::{InventoryFeed, InventorySnapshot};
pub use registration::{RegistrationFlow, RegistrationPhase, ScanOutcome};
pub use scanner::{BarcodeFormat, ScanEvent, ScanSession};
pub use search::{ProductSearch, MIN_QUERY_LEN};
pub use stock::{StockAction, StockAdjuster};
