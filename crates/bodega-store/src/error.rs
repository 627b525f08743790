//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FlowError (bodega-app) ← Adds retryability, serialized for frontend   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document store operation errors.
///
/// These errors wrap backend failures and provide enough categorization
/// for the flows to decide whether a retry could help.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id that does not exist
    /// - Document was deleted concurrently by another screen
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Could not reach or open the backing store.
    ///
    /// ## When This Occurs
    /// - Database file cannot be created or opened
    /// - Connection pool is closed or exhausted
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A read against the store failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A create, update, or delete against the store failed.
    ///
    /// ## When This Occurs
    /// - Disk full, I/O error, database locked past the busy timeout
    /// - Injected failures in tests
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A document body could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - A stored body is not valid JSON (corrupt row)
    /// - A payload cannot be represented as JSON
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Schema migration failed during store startup.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a WriteFailed error.
    pub fn write_failed(message: impl Into<String>) -> Self {
        StoreError::WriteFailed(message.into())
    }

    /// True when the same operation could plausibly succeed on retry.
    ///
    /// Transient infrastructure trouble is retryable; missing documents and
    /// corrupt bodies are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::QueryFailed(_) | StoreError::WriteFailed(_)
        )
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → StoreError::NotFound
/// sqlx::Error::PoolTimedOut   → StoreError::Connection
/// sqlx::Error::PoolClosed     → StoreError::Connection
/// sqlx::Error::Database       → StoreError::QueryFailed
/// Other                       → StoreError::QueryFailed
/// ```
/// Write paths wrap their errors as `WriteFailed` at the call site; this
/// blanket conversion covers reads.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "Document".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::PoolTimedOut => {
                StoreError::Connection("Connection pool exhausted".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::Connection("Pool is closed".to_string()),

            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),

            other => StoreError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Product", "abc-123");
        assert_eq!(err.to_string(), "Product not found: abc-123");

        let err = StoreError::write_failed("disk full");
        assert_eq!(err.to_string(), "Write failed: disk full");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(StoreError::Connection("down".to_string()).is_retryable());
        assert!(StoreError::write_failed("locked").is_retryable());
        assert!(StoreError::QueryFailed("timeout".to_string()).is_retryable());

        assert!(!StoreError::not_found("Document", "x").is_retryable());

        let corrupt = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!StoreError::from(corrupt).is_retryable());
    }

    #[test]
    fn test_serde_json_error_converts() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = bad.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
