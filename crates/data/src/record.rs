//! Decoding store nodes into typed records.

use ascend_core::error::{DataError, StoreError};
use ascend_core::model::{CalendarEvent, Goal, JournalEntry, Post, Task};
use ascend_core::path::KeyPath;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// A record whose id is the key it is stored under.
pub trait Record: Serialize + DeserializeOwned {
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })*
    };
}

impl_record!(Goal, Task, JournalEntry, Post, CalendarEvent);

pub fn decode<T: DeserializeOwned>(path: &KeyPath, value: Value) -> Result<T, DataError> {
    serde_json::from_value(value).map_err(|e| DataError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

pub fn decode_record<T: Record>(path: &KeyPath, id: &str, value: Value) -> Result<T, DataError> {
    let mut record: T = decode(path, value)?;
    record.set_id(id.to_string());
    Ok(record)
}

pub fn encode<T: Serialize>(record: &T) -> Result<Value, DataError> {
    serde_json::to_value(record).map_err(|e| DataError::Store(StoreError::Serialization(e.to_string())))
}

/// Decode a collection node (`id → record`). A missing node is an empty
/// collection. Arrays, which the Realtime Database returns for collections
/// keyed `0..n`, are accepted too.
///
/// A record that still fails to decode is skipped with a warning; one bad
/// record never hides the rest of the collection.
pub fn decode_collection<T: Record>(
    path: &KeyPath,
    node: Option<Value>,
) -> Result<Vec<T>, DataError> {
    let entries: Vec<(String, Value)> = match node {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map.into_iter().collect(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(i, value)| (i.to_string(), value))
            .collect(),
        Some(other) => {
            return Err(DataError::Decode {
            path: path.to_string(),
                reason: format!("expected a collection, found {other}"),
            });
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|(id, value)| match decode_record(path, &id, value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%path, id = %id, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect())
}
