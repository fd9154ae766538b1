//! Storage Module
//!
//! This module owns all server state: one table of plain strings and one
//! table of hashes. Each table has its own `RwLock`, so string commands never
//! wait on hash commands and vice versa.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │                 Database                  │
//! │  ┌─────────────────┐ ┌─────────────────┐  │
//! │  │  StringStore    │ │   HashStore     │  │
//! │  │  RwLock         │ │   RwLock        │  │
//! │  │  key -> value   │ │   hash -> field │  │
//! │  │                 │ │        -> value │  │
//! │  └─────────────────┘ └─────────────────┘  │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use respkv::storage::Database;
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! let db = Arc::new(Database::new());
//!
//! db.strings.set(Bytes::from("name"), Bytes::from("Ariz"));
//! assert_eq!(db.strings.get(b"name"), Some(Bytes::from("Ariz")));
//!
//! db.hashes.hset(Bytes::from("user:1"), Bytes::from("lang"), Bytes::from("rust"));
//! assert_eq!(db.hashes.hget(b"user:1", b"lang"), Some(Bytes::from("rust")));
//! ```

pub mod hashes;
pub mod strings;

pub use hashes::HashStore;
pub use strings::StringStore;

/// All in-memory state of the server.
///
/// Created empty at startup and shared across connection tasks as an `Arc<Database>`.
#[derive(Debug, Default)]
pub struct Database {
    pub strings: StringStore,
    pub hashes: HashStore,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}
