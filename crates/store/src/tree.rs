//! A JSON document tree with Realtime Database write semantics.
//!
//! Shared by the in-memory and file backends. Nulls and empty containers are
//! never stored: writing one deletes the node, and deleting the last child of
//! an object deletes the object too.

use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;
use ascend_core::store::{Fields, PathUpdates};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct Tree {
    root: Value,
}

impl Tree {
    pub fn new(root: Value) -> Self {
        Self {
            root: normalize(root).unwrap_or(Value::Null),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if node.is_null() { None } else { Some(node) }
    }

    pub fn set(&mut self, path: &KeyPath, value: Value) {
        match normalize(value) {
            Some(value) => put(&mut self.root, path.segments(), value),
            None => delete(&mut self.root, path.segments()),
        }
    }

    pub fn remove(&mut self, path: &KeyPath) {
        delete(&mut self.root, path.segments());
    }

    /// Shallow merge. Keys may themselves be `a/b` paths relative to `path`.
    /// All keys are validated before anything is written.
    pub fn update(&mut self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        let mut resolved = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            let relative = KeyPath::parse(&key)?;
            if relative.is_root() {
                return Err(StoreError::InvalidPath("empty update key".into()));
            }
            resolved.push((path.join(&relative), Some(value)));
        }
        self.update_paths(resolved)
    }

    /// Apply every write or none of them. Overlapping paths are rejected, as
    /// the Realtime Database does for multi-location updates.
    pub fn update_paths(&mut self, updates: PathUpdates) -> Result<(), StoreError> {
        check_disjoint(&updates)?;
        for (path, value) in updates {
            self.set(&path, value.unwrap_or(Value::Null));
        }
        Ok(())
    }
}

fn check_disjoint(updates: &PathUpdates) -> Result<(), StoreError> {
    for (i, (a, _)) in updates.iter().enumerate() {
        for (b, _) in updates.iter().skip(i + 1) {
            if a.starts_with(b) || b.starts_with(a) {
                return Err(StoreError::InvalidPath(format!(
                    "overlapping paths in one update: {a} and {b}"
                )));
            }
        }
    }
    Ok(())
}

/// Strip nulls and empty containers. `None` means "nothing left to store".
pub fn normalize(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| normalize(v).map(|v| (k, v)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => (!items.is_empty()).then_some(Value::Array(items)),
        other => Some(other),
    }
}

/// Arrays are objects keyed `"0".."n"` with the holes left out. Anything
/// written or deleted below one sees it in that form, so siblings survive.
fn index_keyed(node: &mut Value) {
    if let Value::Array(items) = node {
        let map: Map<String, Value> = std::mem::take(items)
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        *node = Value::Object(map);
    }
}

fn put(node: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    index_keyed(node);
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(first.clone()).or_insert(Value::Null);
        put(child, rest, value);
    }
}

fn delete(node: &mut Value, segments: &[String]) {
    let Some((first, rest)) = segments.split_first() else {
        *node = Value::Null;
        return;
    };
    index_keyed(node);
    if let Value::Object(map) = node {
        if let Some(child) = map.get_mut(first.as_str()) {
            delete(child, rest);
            if child.is_null() {
                map.remove(first.as_str());
            }
        }
        if map.is_empty() {
            *node = Value::Null;
        }
    }
}
