//! File-based store: the whole tree as one pretty-printed JSON document.
//!
//! The tree is loaded on open and written back after every mutation. A write
//! goes to a sibling temp file that is then renamed over the original, and the
//! in-memory tree only changes once the file is on disk, so a failed flush
//! leaves both untouched.
//!
//! Storage location: `~/.ascend/data.json` unless configured otherwise.

use async_trait::async_trait;
use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;
use ascend_core::store::{DocumentStore, Fields, PathUpdates};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use crate::push_id::PushIdGenerator;
use crate::tree::Tree;

pub struct FileStore {
    path: PathBuf,
    tree: RwLock<Tree>,
    ids: PushIdGenerator,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts an empty tree (the
    /// file is created on first write); an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let root = Self::load_from_disk(&path)?;
        debug!(path = %path.display(), "File store opened");
        Ok(Self {
            path,
            tree: RwLock::new(Tree::new(root)),
            ids: PushIdGenerator::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Result<Value, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Value::Null),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Store file is not valid JSON");
            StoreError::Serialization(format!("{}: {e}", path.display()))
        })
    }

    fn flush(&self, tree: &Tree) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("Failed to create store directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(tree.root())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .map_err(|e| StoreError::Io(format!("Failed to write store file: {e}")))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Io(format!("Failed to replace store file: {e}")))?;
        Ok(())
    }

    /// Apply `change` to a copy of the tree, persist it, then publish it.
    async fn mutate<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Tree) -> Result<(), StoreError>,
    {
        let mut guard = self.tree.write().await;
        let mut next = guard.clone();
        change(&mut next)?;
        self.flush(&next)?;
        *guard = next;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError> {
        Ok(self.tree.read().await.get(path).cloned())
    }

    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        debug!(%path, "set");
        self.mutate(|tree| {
            tree.set(path, value);
            Ok(())
        })
        .await
    }

    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        debug!(%path, fields = fields.len(), "update");
        self.mutate(|tree| tree.update(path, fields)).await
    }

    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError> {
        debug!(paths = updates.len(), "multi-path update");
        self.mutate(|tree| tree.update_paths(updates)).await
    }

    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError> {
        debug!(%path, "remove");
        self.mutate(|tree| {
            tree.remove(path);
            Ok(())
        })
        .await
    }

    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError> {
        let id = self.ids.next_id();
        let child = path.child(&id)?;
        debug!(%child, "push");
        self.mutate(|tree| {
            tree.set(&child, value);
            Ok(())
        })
        .await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(s: &str) -> KeyPath {
        KeyPath::parse(s).unwrap()
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data.json")).unwrap();
        assert!(store.get(&p("users")).await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let store = FileStore::open(&path).unwrap();
        let id = store
            .push(&p("users/u1/goals"), json!({"title": "Learn Rust"}))
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let goal = reopened
            .get(&p("users/u1/goals").child(&id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(goal["title"], "Learn Rust");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn rejected_update_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStore::open(&path).unwrap();
        store.set(&p("a/b"), json!(1)).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let result = store
            .update_paths(vec![(p("a"), None), (p("a/b"), Some(json!(2)))])
            .await;
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(store.get(&p("a/b")).await.unwrap(), Some(json!(1)));
    }
}
