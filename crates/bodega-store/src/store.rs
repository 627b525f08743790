//! # Document Store Trait
//!
//! The storage seam: one trait, two backends.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         DocumentStore                                   │
//! │                                                                         │
//! │   create ─ fetch ─ fetch_all ─ query_eq ─ update_fields ─ delete        │
//! │                           subscribe ──► ChangeFeed                      │
//! │                                                                         │
//! │        ┌───────────────────┐         ┌───────────────────┐              │
//! │        │    SqliteStore    │         │    MemoryStore    │              │
//! │        │  documents table  │         │  HashMap + fault  │              │
//! │        │  (WAL, pooled)    │         │  injection hooks  │              │
//! │        └───────────────────┘         └───────────────────┘              │
//! │                                                                         │
//! │   Feed contract: a new subscriber first receives the collection as      │
//! │   it stands, then one snapshot per observed change. A slow reader       │
//! │   skips straight to the latest snapshot; history is not replayed.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::document::Document;
use crate::error::StoreResult;

// =============================================================================
// DocumentStore Trait
// =============================================================================

/// Async CRUD plus live snapshots over named collections of JSON documents.
///
/// Flows are written against this trait so tests can swap the SQLite
/// backend for [`MemoryStore`](crate::MemoryStore) without touching them.
///
/// ## Example
/// ```rust,ignore
/// let store = SqliteStore::new(StoreConfig::new("bodega.db")).await?;
/// let id = store.create("productos", body).await?;
/// let doc = store.fetch("productos", &id).await?;
/// ```
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document with a store-assigned id and returns that id.
    fn create(
        &self,
        collection: &str,
        body: Value,
    ) -> impl Future<Output = StoreResult<String>> + Send;

    /// Fetches one document by id, `None` when absent.
    fn fetch(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Fetches every document in the collection, oldest insert first.
    fn fetch_all(&self, collection: &str) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Fetches the documents whose top-level `field` equals `value` exactly.
    ///
    /// Equality is JSON equality: `"7501"` never matches `7501`.
    fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Shallow-merges `fields` into an existing document's body.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) when the id
    /// does not exist; updates never create documents.
    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Deletes a document.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) when the id
    /// does not exist, so callers can tell a no-op from a removal.
    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Opens a live feed over the collection.
    ///
    /// The feed yields the current contents immediately, then a fresh
    /// snapshot after each observed mutation.
    fn subscribe(&self, collection: &str) -> impl Future<Output = StoreResult<ChangeFeed>> + Send;
}

// =============================================================================
// ChangeFeed
// =============================================================================

/// A live stream of collection snapshots, newest state wins.
///
/// Dropping the feed ends the subscription; the store keeps publishing
/// for other subscribers on the same collection.
pub struct ChangeFeed {
    stream: WatchStream<Vec<Document>>,
}

impl ChangeFeed {
    pub(crate) fn new(receiver: watch::Receiver<Vec<Document>>) -> Self {
        ChangeFeed {
            stream: WatchStream::new(receiver),
        }
    }

    /// Waits for the next snapshot. `None` once the store shuts down.
    pub async fn next(&mut self) -> Option<Vec<Document>> {
        self.stream.next().await
    }
}

impl Stream for ChangeFeed {
    type Item = Vec<Document>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed").finish_non_exhaustive()
    }
}

// =============================================================================
// Feed Registry
// =============================================================================

/// Per-collection watch channels, shared by both backends.
///
/// A channel is created lazily on the first subscribe and lives for the
/// rest of the store's life. Collections nobody watches cost nothing on
/// the write path beyond one map lookup.
#[derive(Default)]
pub(crate) struct FeedRegistry {
    channels: Mutex<HashMap<String, watch::Sender<Vec<Document>>>>,
}

impl FeedRegistry {
    /// True when the collection has a channel, meaning mutations must
    /// publish a fresh snapshot.
    pub(crate) fn is_watched(&self, collection: &str) -> bool {
        let channels = self.channels.lock().expect("feed registry lock poisoned");
        channels.contains_key(collection)
    }

    /// Publishes a snapshot to the collection's channel, if one exists.
    ///
    /// Publishing does not care whether receivers are currently alive;
    /// the channel stores the latest value for future subscribers.
    pub(crate) fn publish(&self, collection: &str, snapshot: Vec<Document>) {
        let channels = self.channels.lock().expect("feed registry lock poisoned");
        if let Some(sender) = channels.get(collection) {
            sender.send_replace(snapshot);
        }
    }

    /// Subscribes to a collection, seeding the channel with `current`
    /// when this is the first subscriber. Later subscribers keep the
    /// value already in the channel, which is at least as fresh.
    pub(crate) fn subscribe_with(
        &self,
        collection: &str,
        current: Vec<Document>,
    ) -> watch::Receiver<Vec<Document>> {
        let mut channels = self.channels.lock().expect("feed registry lock poisoned");
        channels
            .entry(collection.to_string())
            .or_insert_with(|| watch::channel(current).0)
            .subscribe()
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
    async fn test_feed_yields_seed_then_published_snapshots() {
        let registry = FeedRegistry::default();
        let seed = vec![Document::new("a", json!({ "stock": 1 }))];

        let mut feed = ChangeFeed::new(registry.subscribe_with("productos", seed));
        assert_eq!(feed.next().await.unwrap()[0].id, "a");

        registry.publish(
            "productos",
            vec![
                Document::new("a", json!({ "stock": 1 })),
                Document::new("b", json!({ "stock": 2 })),
            ],
        );
        assert_eq!(feed.next().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_slow_reader_skips_to_latest() {
        let registry = FeedRegistry::default();
        let mut feed = ChangeFeed::new(registry.subscribe_with("productos", Vec::new()));

        // Consume the seed, then let three publishes pile up.
        assert!(feed.next().await.unwrap().is_empty());
        for n in 1..=3 {
            registry.publish("productos", vec![Document::new(n.to_string(), json!({}))]);
        }

        let snapshot = feed.next().await.unwrap();
        assert_eq!(snapshot[0].id, "3");
    }

    #[tokio::test]
    async fn test_second_subscriber_sees_channel_value_not_its_seed() {
        let registry = FeedRegistry::default();
        let _first = registry.subscribe_with("productos", vec![Document::new("a", json!({}))]);

        // A stale seed from a racing fetch must not clobber the channel.
        let mut feed = ChangeFeed::new(registry.subscribe_with("productos", Vec::new()));
        assert_eq!(feed.next().await.unwrap()[0].id, "a");
    }

    #[test]
    fn test_unwatched_collection_is_free() {
        let registry = FeedRegistry::default();
        assert!(!registry.is_watched("productos"));

        registry.publish("productos", vec![Document::new("a", json!({}))]);
        assert!(!registry.is_watched("productos"));
    }
}
