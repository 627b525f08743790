//! # SQLite Document Store
//!
//! Connection pool setup and the SQLite-backed [`DocumentStore`].
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Document Store                              │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::new(config).await ← Create pool + run migrations         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  documents table (collection, id, body JSON, created_at)               │
//! │       │                                                                 │
//! │       ├── create / fetch / fetch_all / query_eq / update / delete      │
//! │       └── every successful mutation republishes the collection to      │
//! │           its feed channel, if anyone subscribed                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Writers don't block readers
//! - Better crash recovery

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::{merge_fields, Document};
use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::store::{ChangeFeed, DocumentStore, FeedRegistry};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/bodega.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a single-device app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = StoreConfig::in_memory();
    /// let store = SqliteStore::new(config).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// SqliteStore
// =============================================================================

/// SQLite-backed document store.
///
/// Cheap to clone; clones share the pool and the feed channels, so a
/// mutation through one clone reaches subscribers obtained from another.
#[derive(Clone)]
pub struct SqliteStore {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Per-collection feed channels, shared across clones.
    feeds: Arc<FeedRegistry>,
}

impl SqliteStore {
    /// Creates a new store over a SQLite database.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite for a local single-device app:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::new("./bodega.db");
    /// let store = SqliteStore::new(config).await?;
    /// ```
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing document store"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::Connection(e.to_string()))?
            // WAL mode: Better concurrent read performance
            // Readers don't block writers, writers don't block readers
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: Good balance of durability and speed
            .synchronous(SqliteSynchronous::Normal)
            // Create file if it doesn't exist
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Document store pool created"
        );

        if config.run_migrations {
            migrations::run_migrations(&pool).await?;
        }

        Ok(SqliteStore {
            pool,
            feeds: Arc::new(FeedRegistry::default()),
        })
    }

    /// Closes the connection pool.
    ///
    /// After calling close, all store operations will fail.
    pub async fn close(&self) {
        info!("Closing document store pool");
        self.pool.close().await;
    }

    /// Loads one document by id.
    async fn load_one(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row_to_document(&row)).transpose()
    }

    /// Loads a whole collection, oldest insert first.
    async fn load_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_document).collect()
    }

    /// Republishes the collection to its feed channel after a mutation.
    ///
    /// The mutation has already succeeded; a failed refresh leaves the
    /// feed stale until the next mutation, it never fails the operation.
    async fn publish_snapshot(&self, collection: &str) {
        if !self.feeds.is_watched(collection) {
            return;
        }

        match self.load_all(collection).await {
            Ok(snapshot) => self.feeds.publish(collection, snapshot),
            Err(err) => warn!(
                collection = %collection,
                error = %err,
                "Feed snapshot refresh failed"
            ),
        }
    }
}

impl DocumentStore for SqliteStore {
    async fn create(&self, collection: &str, body: Value) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let body_text = serde_json::to_string(&body)?;

        debug!(collection = %collection, id = %id, "Creating document");

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(body_text)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

        self.publish_snapshot(collection).await;
        Ok(id)
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.load_one(collection, id).await
    }

    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.load_all(collection).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        // Equality is decided in Rust so both backends agree on JSON
        // semantics (string vs number, null vs missing).
        let documents = self.load_all(collection).await?;
        Ok(documents
            .into_iter()
            .filter(|d| d.body.get(field) == Some(value))
            .collect())
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        let mut document = self
            .load_one(collection, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Document", id))?;

        merge_fields(&mut document.body, &fields)?;
        let body_text = serde_json::to_string(&document.body)?;

        debug!(collection = %collection, id = %id, "Updating document fields");

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = ?
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(body_text)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

        // The row can vanish between the read and the write.
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Document", id));
        }

        self.publish_snapshot(collection).await;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        debug!(collection = %collection, id = %id, "Deleting document");

        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Document", id));
        }

        self.publish_snapshot(collection).await;
        Ok(())
    }

    async fn subscribe(&self, collection: &str) -> StoreResult<ChangeFeed> {
        let current = self.load_all(collection).await?;
        Ok(ChangeFeed::new(
            self.feeds.subscribe_with(collection, current),
        ))
    }
}

/// Maps a `documents` row to a [`Document`].
fn row_to_document(row: &SqliteRow) -> StoreResult<Document> {
    let id: String = row.try_get("id")?;
    let body: String = row.try_get("body")?;
    let value = serde_json::from_str(&body)?;
    Ok(Document::new(id, value))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> SqliteStore {
        SqliteStore::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let store = store().await;
        let id = store
            .create("productos", json!({ "productName": "Pan", "stock": 3 }))
            .await
            .unwrap();

        let document = store.fetch("productos", &id).await.unwrap().unwrap();
        assert_eq!(document.id, id);
        assert_eq!(document.body["productName"], json!("Pan"));
        assert!(store.fetch("productos", "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_insertion_order() {
        let store = store().await;
        let mut inserted = Vec::new();
        for n in 1..=3 {
            inserted.push(store.create("productos", json!({ "n": n })).await.unwrap());
        }

        let ids: Vec<String> = store
            .fetch_all("productos")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, inserted);
    }

    #[tokio::test]
    async fn test_query_eq_uses_json_equality() {
        let store = store().await;
        store
            .create("productos", json!({ "barcode": "7501" }))
            .await
            .unwrap();
        store
            .create("productos", json!({ "barcode": 7501 }))
            .await
            .unwrap();

        let matches = store
            .query_eq("productos", "barcode", &json!("7501"))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].body["barcode"], json!("7501"));
    }

    #[tokio::test]
    async fn test_update_fields_merges_and_requires_existing_id() {
        let store = store().await;
        let id = store
            .create("productos", json!({ "stock": 9, "brand": "Lala" }))
            .await
            .unwrap();

        store
            .update_fields("productos", &id, json!({ "stock": 4 }))
            .await
            .unwrap();
        let document = store.fetch("productos", &id).await.unwrap().unwrap();
        assert_eq!(document.body["stock"], json!(4));
        assert_eq!(document.body["brand"], json!("Lala"));

        let err = store
            .update_fields("productos", "ghost", json!({ "stock": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = store().await;
        let err = store.delete("productos", "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_feed_tracks_mutations() {
        let store = store().await;
        let mut feed = store.subscribe("productos").await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());

        let id = store
            .create("productos", json!({ "stock": 1 }))
            .await
            .unwrap();
        assert_eq!(feed.next().await.unwrap().len(), 1);

        store.delete("productos", &id).await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());
    }
}
