//! DocumentStore trait: the hierarchical key-value tree everything lives in.
//!
//! The store holds one JSON tree. Every operation addresses a node by
//! [`KeyPath`]:
//! - point read, point write, point delete
//! - shallow merge of named children (`update`)
//! - atomic multi-path update (`update_paths`)
//! - keyed append under a store-generated push id (`push`)
//!
//! Writing JSON `null` anywhere is a delete, and containers left empty by a
//! delete disappear, so a missing path always reads back as `None`.
//!
//! Implementations: in-memory, JSON file, Firebase Realtime Database REST.

use async_trait::async_trait;
use serde_json::Value;
use crate::error::StoreError;
use crate::path::KeyPath;

/// Named children merged by [`DocumentStore::update`].
pub type Fields = serde_json::Map<String, Value>;

/// Absolute path → new value (`None` deletes) for [`DocumentStore::update_paths`].
pub type PathUpdates = Vec<(KeyPath, Option<Value>)>;

/// The core DocumentStore trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The backend name (e.g., "memory", "file", "firebase").
    fn name(&self) -> &str;

    /// Read the node at `path`. Missing paths return `Ok(None)`.
    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError>;

    /// Replace the node at `path` (including all of its children).
    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError>;

    /// Replace only the named children of `path`; siblings are untouched.
    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError>;

    /// Apply several absolute writes as one unit: all of them or none.
    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError>;

    /// Delete the node at `path`. Deleting a missing path is not an error.
    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError>;

    /// Append `value` under a fresh push id below `path`, returning the id.
    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError>;
}
