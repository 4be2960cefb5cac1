//! In-memory store: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;
use ascend_core::store::{DocumentStore, Fields, PathUpdates};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use crate::push_id::PushIdGenerator;
use crate::tree::Tree;

/// An in-memory document tree.
/// Useful for testing and sessions where persistence isn't needed.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tree: Arc<RwLock<Tree>>,
    ids: Arc<PushIdGenerator>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing tree (e.g. a fixture).
    pub fn with_root(root: Value) -> Self {
        Self {
            tree: Arc::new(RwLock::new(Tree::new(root))),
            ids: Arc::new(PushIdGenerator::new()),
        }
    }

    /// A copy of the whole tree.
    pub async fn snapshot(&self) -> Value {
        self.tree.read().await.root().clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str { "memory" }

    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError> {
        Ok(self.tree.read().await.get(path).cloned())
    }

    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        debug!(%path, "set");
        self.tree.write().await.set(path, value);
        Ok(())
    }

    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        debug!(%path, fields = fields.len(), "update");
        self.tree.write().await.update(path, fields)
    }

    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError> {
        debug!(paths = updates.len(), "multi-path update");
        self.tree.write().await.update_paths(updates)
    }

    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError> {
        debug!(%path, "remove");
        self.tree.write().await.remove(path);
        Ok(())
    }

    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError> {
        let id = self.ids.next_id();
        let child = path.child(&id)?;
        debug!(%child, "push");
        self.tree.write().await.set(&child, value);
        Ok(id)
    }
}
