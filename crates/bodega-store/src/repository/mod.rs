//! # Repository Module
//!
//! Typed product access on top of the schemaless document store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Flows never touch collections or JSON bodies directly.                 │
//! │                                                                         │
//! │  Registration / Stock / Search flow                                     │
//! │       │                                                                 │
//! │       │  repo.insert(&new_product)                                      │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository<S: DocumentStore>                                    │
//! │  ├── insert(&self, product)      ← typed NewProduct in                  │
//! │  ├── get(&self, id)              ← complete Product out                 │
//! │  ├── list(&self)                 ← incomplete documents filtered        │
//! │  ├── barcode_in_use(&self, code)                                        │
//! │  ├── set_stock(&self, id, n)     ← single-field update                  │
//! │  └── watch(&self)                ← live collection feed                 │
//! │       │                                                                 │
//! │       │  JSON documents, "productos" collection                         │
//! │       ▼                                                                 │
//! │  DocumentStore (SQLite or in-memory)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
