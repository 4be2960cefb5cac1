//! Document store implementations for Ascend.
//!
//! All backends implement `ascend_core::DocumentStore`.
//! [`open_from_config`] picks one from the `[store]` config section.

pub mod file_backend;
pub mod firebase;
pub mod in_memory;
pub mod push_id;
pub mod tree;

pub use file_backend::FileStore;
pub use firebase::FirebaseStore;
pub use in_memory::InMemoryStore;
pub use push_id::PushIdGenerator;

use std::sync::Arc;
use std::time::Duration;
use ascend_config::{StoreBackend, StoreConfig};
use ascend_core::error::StoreError;
use ascend_core::store::DocumentStore;

/// Open the backend named in the config.
pub fn open_from_config(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        StoreBackend::File => Arc::new(FileStore::open(config.resolved_path())?),
        StoreBackend::Firebase => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                StoreError::InvalidPath("store.database_url is not set".into())
            })?;
            Arc::new(FirebaseStore::new(
                url,
                config.auth_token.clone(),
                Duration::from_secs(config.timeout_secs),
            )?)
        }
    };
    tracing::debug!(backend = store.name(), "Document store opened");
    Ok(store)
}
