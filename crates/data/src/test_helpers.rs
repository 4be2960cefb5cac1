//! Shared test helpers for repository tests.

use async_trait::async_trait;
use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;
use ascend_core::store::{DocumentStore, Fields, PathUpdates};
use ascend_store::InMemoryStore;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::Repository;

/// Wraps an [`InMemoryStore`] and fails chosen operations on demand.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_multi_path: AtomicBool,
}

impl FaultyStore {
    fn check(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Network("injected failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    fn name(&self) -> &str {
        "faulty"
    }

    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(path).await
    }

    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.set(path, value).await
    }

    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.update(path, fields).await
    }

    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        Self::check(&self.fail_multi_path)?;
        self.inner.update_paths(updates).await
    }

    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.remove(path).await
    }

    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.push(path, value).await
    }
}

pub fn memory_repo() -> Repository {
    Repository::new(Arc::new(InMemoryStore::new()))
}

pub fn faulty_repo() -> (Repository, Arc<FaultyStore>) {
    let store = Arc::new(FaultyStore::default());
    (Repository::new(store.clone()), store)
}
