//! # Flow Error Types
//!
//! The error envelope the frontend receives, plus configuration errors.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bodega Inventory                       │
//! │                                                                         │
//! │  Frontend                       Rust Backend                            │
//! │  ────────                       ────────────                           │
//! │                                                                         │
//! │  save() / adjust() / search()                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Flow Method                                                     │  │
//! │  │  Result<T, FlowError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Field rules fail? ──── FormErrors ───────────────┐             │  │
//! │  │         │                                         │             │  │
//! │  │         ▼                                         ▼             │  │
//! │  │  Store fails? ───────── StoreError ─────────── FlowError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "DUPLICATE_BARCODE"                                      │
//! │    // e.message = "Barcode '7501031311309' is already registered"       │
//! │    // e.retryable = false                                               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retryable Flag
//! Store outages deserve a "Try again" button; a duplicate barcode does not.
//! The flag carries that distinction so the UI never has to parse messages.

use serde::Serialize;
use thiserror::Error;

use bodega_core::FormErrors;
use bodega_store::StoreError;

// =============================================================================
// Flow Error
// =============================================================================

/// Error returned from application flows.
///
/// ## Serialization
/// This is what the frontend receives when a flow fails:
/// ```json
/// {
///   "code": "STOCK_LIMIT",
///   "message": "Cannot decrease by more than 4 units",
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Whether retrying the same action can succeed without changing input
    pub retryable: bool,
}

/// Error codes for flow responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await save(form);
/// } catch (e) {
///   switch (e.code) {
///     case 'VALIDATION_FAILED':
///       highlightFields(await fieldErrors());
///       break;
///     case 'DUPLICATE_BARCODE':
///       showAlert('Código de barras ya registrado');
///       break;
///     default:
///       showAlert(e.message, { retry: e.retryable });
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more form fields failed validation
    ValidationFailed,

    /// The scanned or submitted barcode already belongs to a product
    DuplicateBarcode,

    /// A stock adjustment quantity was not a positive integer
    InvalidQuantity,

    /// A decrease would push stock below one unit
    StockLimit,

    /// Resource not found
    NotFound,

    /// Reading from the document store failed
    StoreReadFailed,

    /// Writing to the document store failed
    StoreWriteFailed,

    /// The flow was closed (screen unmounted) before the call
    FlowClosed,
}

impl FlowError {
    /// Creates a new flow error.
    pub fn new(code: ErrorCode, message: impl Into<String>, retryable: bool) -> Self {
        FlowError {
            code,
            message: message.into(),
            retryable,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        FlowError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
            false,
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FlowError::new(ErrorCode::ValidationFailed, message, false)
    }

    /// Creates a duplicate barcode error.
    pub fn duplicate_barcode(barcode: &str) -> Self {
        FlowError::new(
            ErrorCode::DuplicateBarcode,
            format!("Barcode '{}' is already registered", barcode),
            false,
        )
    }

    /// Creates an invalid quantity error.
    pub fn invalid_quantity(message: impl Into<String>) -> Self {
        FlowError::new(ErrorCode::InvalidQuantity, message, false)
    }

    /// Creates a stock limit error for a rejected decrease.
    pub fn stock_limit(max_decrease: i64) -> Self {
        FlowError::new(
            ErrorCode::StockLimit,
            format!("Cannot decrease by more than {} units", max_decrease),
            false,
        )
    }

    /// Creates a closed-flow error.
    pub fn closed() -> Self {
        FlowError::new(
            ErrorCode::FlowClosed,
            "Flow is closed; no further input is accepted",
            false,
        )
    }
}

/// Converts store errors to flow errors.
///
/// Internal details (SQL text, pool state) are logged here and replaced
/// with generic messages; the frontend only ever needs the code.
impl From<StoreError> for FlowError {
    fn from(err: StoreError) -> Self {
        let retryable = err.is_retryable();
        match err {
            StoreError::NotFound { entity, id } => FlowError::not_found(&entity, &id),
            StoreError::Connection(e) => {
                tracing::error!("Store connection failed: {}", e);
                FlowError::new(ErrorCode::StoreReadFailed, "Store is unreachable", retryable)
            }
            StoreError::QueryFailed(e) => {
                tracing::error!("Store query failed: {}", e);
                FlowError::new(ErrorCode::StoreReadFailed, "Store read failed", retryable)
            }
            StoreError::WriteFailed(e) => {
                tracing::error!("Store write failed: {}", e);
                FlowError::new(
                    ErrorCode::StoreWriteFailed,
                    "Product could not be saved",
                    retryable,
                )
            }
            StoreError::Serialization(e) => {
                tracing::error!("Stored document could not be decoded: {}", e);
                FlowError::new(
                    ErrorCode::StoreReadFailed,
                    "Stored product data could not be decoded",
                    retryable,
                )
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Store migration failed: {}", e);
                FlowError::new(
                    ErrorCode::StoreWriteFailed,
                    "Store schema upgrade failed",
                    retryable,
                )
            }
        }
    }
}

/// Converts whole-form validation failures to flow errors.
///
/// The per-field messages stay on the flow (the form screen reads them
/// from there); the envelope only carries the summary.
impl From<FormErrors> for FlowError {
    fn from(errors: FormErrors) -> Self {
        FlowError::validation(errors.to_string())
    }
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for FlowError {}

// =============================================================================
// Config Error
// =============================================================================

/// Errors produced while loading or saving the app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has a value that cannot work.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
