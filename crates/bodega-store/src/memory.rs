//! # In-Memory Store
//!
//! HashMap-backed [`DocumentStore`] for tests and demos.
//!
//! Behaves like the SQLite backend from a caller's point of view: ids are
//! store-assigned, insertion order is preserved, feeds get a snapshot per
//! mutation. On top of that it carries test hooks the real backend cannot
//! offer.
//!
//! ## Test Hooks
//! - [`MemoryStore::fail_next_write`] makes exactly one upcoming write
//!   fail with a retryable error, leaving the data untouched.
//! - [`MemoryStore::create_calls`] and [`MemoryStore::read_calls`] count
//!   attempts, so a test can prove an operation ran exactly once, or
//!   never ran at all.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use crate::document::{merge_fields, Document};
use crate::error::{StoreError, StoreResult};
use crate::store::{ChangeFeed, DocumentStore, FeedRegistry};

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory document store. Cheap to clone; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    feeds: FeedRegistry,
    fail_next_write: AtomicBool,
    create_calls: AtomicU32,
    read_calls: AtomicU32,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Arms a one-shot fault: the next create, update or delete fails
    /// with a retryable error and changes nothing.
    pub fn fail_next_write(&self) {
        self.inner.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Number of `create` attempts so far, armed faults included.
    pub fn create_calls(&self) -> u32 {
        self.inner.create_calls.load(Ordering::SeqCst)
    }

    /// Number of read attempts (`fetch`, `fetch_all`, `query_eq`) so far.
    pub fn read_calls(&self) -> u32 {
        self.inner.read_calls.load(Ordering::SeqCst)
    }

    fn take_write_fault(&self) -> StoreResult<()> {
        if self.inner.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StoreError::write_failed("injected fault"));
        }
        Ok(())
    }

    fn count_read(&self) {
        self.inner.read_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, body: Value) -> StoreResult<String> {
        self.inner.create_calls.fetch_add(1, Ordering::SeqCst);
        self.take_write_fault()?;

        let id = Uuid::new_v4().to_string();
        let mut collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        let documents = collections.entry(collection.to_string()).or_default();
        documents.push(Document::new(id.clone(), body));

        self.inner.feeds.publish(collection, documents.clone());
        Ok(id)
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.count_read();
        let collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| d.id == id).cloned()))
    }

    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.count_read();
        let collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        self.count_read();
        let collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| d.body.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        self.take_write_fault()?;

        let mut collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                merge_fields(&mut document.body, &fields)?;
                self.inner.feeds.publish(collection, documents.clone());
                Ok(())
            }
            None => Err(StoreError::not_found("Document", id)),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.take_write_fault()?;

        let mut collections = self
            .inner
            .collections
            .lock()
            .expect("memory store lock poisoned");
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter().position(|d| d.id == id) {
            Some(index) => {
                documents.remove(index);
                self.inner.feeds.publish(collection, documents.clone());
                Ok(())
            }
            None => Err(StoreError::not_found("Document", id)),
        }
    }

    async fn subscribe(&self, collection: &str) -> StoreResult<ChangeFeed> {
        let snapshot = {
            let collections = self
                .inner
                .collections
                .lock()
                .expect("memory store lock poisoned");
            collections.get(collection).cloned().unwrap_or_default()
        };
        Ok(ChangeFeed::new(
            self.inner.feeds.subscribe_with(collection, snapshot),
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let first = store.create("productos", json!({ "stock": 1 })).await.unwrap();
        let second = store.create("productos", json!({ "stock": 2 })).await.unwrap();

        assert_ne!(first, second);
        let fetched = store.fetch("productos", &first).await.unwrap().unwrap();
        assert_eq!(fetched.body["stock"], json!(1));
    }

    #[tokio::test]
    async fn test_fetch_absent_is_none_not_error() {
        let store = MemoryStore::new();
        assert!(store.fetch("productos", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_eq_uses_json_equality() {
        let store = MemoryStore::new();
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
        let store = MemoryStore::new();
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
        let store = MemoryStore::new();
        let err = store.delete("productos", "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fault_hits_exactly_one_write_and_changes_nothing() {
        let store = MemoryStore::new();
        store.fail_next_write();

        let err = store
            .create("productos", json!({ "stock": 1 }))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(store.fetch_all("productos").await.unwrap().is_empty());

        // Fault is consumed; the retry lands.
        store.create("productos", json!({ "stock": 1 })).await.unwrap();
        assert_eq!(store.fetch_all("productos").await.unwrap().len(), 1);
        assert_eq!(store.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_read_counter_covers_all_read_paths() {
        let store = MemoryStore::new();
        let id = store.create("productos", json!({})).await.unwrap();

        store.fetch("productos", &id).await.unwrap();
        store.fetch_all("productos").await.unwrap();
        store
            .query_eq("productos", "barcode", &json!("x"))
            .await
            .unwrap();
        assert_eq!(store.read_calls(), 3);
    }

    #[tokio::test]
    async fn test_feed_tracks_mutations() {
        let store = MemoryStore::new();
        let mut feed = store.subscribe("productos").await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());

        let id = store.create("productos", json!({ "stock": 1 })).await.unwrap();
        assert_eq!(feed.next().await.unwrap().len(), 1);

        store.delete("productos", &id).await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());
    }
}
