//! Data access layer for Ascend.
//!
//! [`Repository`] maps each entity to its key path and performs
//! create/read/update/delete against any `DocumentStore`:
//! - `create` pushes under a store-generated id and returns it
//! - `read` of a missing path is an empty collection (or `None`), never an error
//! - `update` is a shallow merge of the given fields, unvalidated
//! - `delete` of a missing record succeeds
//!
//! Store failures surface as [`DataError::Store`]; nothing here retries.

pub mod calendar;
pub mod goals;
pub mod journal;
pub mod paths;
pub mod posts;
pub mod record;
pub mod tasks;
pub mod users;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;
use ascend_core::error::DataError;
use ascend_core::path::KeyPath;
use ascend_core::store::{DocumentStore, Fields};
use record::Record;
use serde_json::Value;

/// Typed access to every entity in the tree. Cheap to clone.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn read_collection<T: Record>(&self, path: &KeyPath) -> Result<Vec<T>, DataError> {
        let node = self.store.get(path).await?;
        record::decode_collection(path, node)
    }

    async fn read_record<T: Record>(
        &self,
        collection: &KeyPath,
        id: &str,
    ) -> Result<Option<T>, DataError> {
        let path = collection.child(id)?;
        match self.store.get(&path).await? {
            Some(value) => record::decode_record(&path, id, value).map(Some),
            None => Ok(None),
        }
    }

    async fn push_record<T: Record>(&self, collection: &KeyPath, record: &T) -> Result<String, DataError> {
        let value = record::encode(record)?;
        Ok(self.store.push(collection, value).await?)
    }

    async fn merge(&self, path: &KeyPath, fields: Fields) -> Result<(), DataError> {
        Ok(self.store.update(path, fields).await?)
    }

    async fn delete(&self, path: &KeyPath) -> Result<(), DataError> {
        Ok(self.store.remove(path).await?)
    }
}

#[doc(hidden)]
pub use serde_json as __serde_json;

/// Build a [`Fields`] map from `key => value` pairs.
///
/// ```
/// let fields = ascend_data::fields! { "progress" => 40, "completed" => false };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::__serde_json::Map::new();
        $(map.insert(($key).to_string(), $crate::__serde_json::json!($value));)*
        map
    }};
}

pub(crate) fn now_value() -> Value {
    serde_json::json!(chrono::Utc::now())
}
