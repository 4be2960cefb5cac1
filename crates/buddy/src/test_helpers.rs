//! Mock providers and stores shared by the buddy tests.

use async_trait::async_trait;
use ascend_core::error::{ProviderError, StoreError};
use ascend_core::message::Message;
use ascend_core::path::KeyPath;
use ascend_core::provider::{Provider, ProviderRequest, ProviderResponse};
use ascend_core::store::{DocumentStore, Fields, PathUpdates};
use ascend_data::Repository;
use ascend_store::InMemoryStore;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: None,
        model: "test-model".into(),
    }
}

/// Returns the scripted replies in order. Panics when they run out.
pub struct ScriptedProvider {
    replies: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().map(String::from).collect()),
            call_count: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .expect("ScriptedProvider: no more replies");
        Ok(text_response(&reply))
    }
}

/// Always fails with the given error.
pub struct FailingProvider {
    error: ProviderError,
    call_count: Mutex<usize>,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self {
            error,
            call_count: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        Err(self.error.clone())
    }
}

/// Replies with fixed text and keeps the last request for inspection.
pub struct RecordingProvider {
    reply: String,
    last: Mutex<Option<ProviderRequest>>,
}

impl RecordingProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.into(),
            last: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.last.lock().unwrap() = Some(request);
        Ok(text_response(&self.reply))
    }
}

/// Signals `started` on each call, then holds the reply until `release`.
pub struct GatedProvider {
    reply: String,
    pub started: Notify,
    pub release: Notify,
    call_count: Mutex<usize>,
}

impl GatedProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.into(),
            started: Notify::new(),
            release: Notify::new(),
            call_count: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl Provider for GatedProvider {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        self.started.notify_one();
        self.release.notified().await;
        Ok(text_response(&self.reply))
    }
}

/// An in-memory store whose reads can be made to fail.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryStore,
    pub fail_reads: AtomicBool,
}

#[async_trait]
impl DocumentStore for FaultyStore {
    fn name(&self) -> &str {
        "faulty"
    }

    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Network("injected failure".into()));
        }
        self.inner.get(path).await
    }

    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        self.inner.set(path, value).await
    }

    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        self.inner.update(path, fields).await
    }

    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError> {
        self.inner.update_paths(updates).await
    }

    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError> {
        self.inner.remove(path).await
    }

    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError> {
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
