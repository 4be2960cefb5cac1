//! Firebase Realtime Database over its REST API.
//!
//! Every node is addressable as `{database_url}/{path}.json`:
//! - `GET` reads (`null` body = missing)
//! - `PUT` replaces, `PATCH` merges, `DELETE` removes
//! - `POST` appends under a server-generated push id (`{"name": id}`)
//! - a `PATCH` on `/.json` with slash-separated keys is an atomic
//!   multi-location update
//!
//! Authentication is the `auth` query parameter (database secret or ID token).

use async_trait::async_trait;
use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;
use ascend_core::store::{DocumentStore, Fields, PathUpdates};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub struct FirebaseStore {
    base_url: Url,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl FirebaseStore {
    pub fn new(
        database_url: &str,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(database_url.trim_end_matches('/'))
            .map_err(|e| StoreError::InvalidPath(format!("bad database url {database_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidPath(format!(
                "database url cannot be a base: {database_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            auth_token,
            client,
        })
    }

    /// `{base}/{segments...}.json?auth=...`, with each segment percent-encoded.
    fn url_for(&self, path: &KeyPath) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidPath(self.base_url.to_string()))?;
            segments.pop_if_empty();
            match path.segments().split_last() {
                None => {
                    segments.push(".json");
                }
                Some((last, init)) => {
                    segments.extend(init);
                    segments.push(&format!("{last}.json"));
                }
            }
        }
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &KeyPath,
        body: Option<&Value>,
    ) -> Result<Value, StoreError> {
        let url = self.url_for(path)?;
        debug!(%method, %path, "firebase request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::PermissionDenied {
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Firebase returned error");
            return Err(StoreError::Http {
                status: status.as_u16(),
                message: error_message(&error_body),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Firebase errors look like `{"error": "Permission denied"}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

fn updates_body(updates: PathUpdates) -> Value {
    let body: Fields = updates
        .into_iter()
        .map(|(path, value)| (path.to_string(), value.unwrap_or(Value::Null)))
        .collect();
    Value::Object(body)
}

#[async_trait]
impl DocumentStore for FirebaseStore {
    fn name(&self) -> &str {
        "firebase"
    }

    async fn get(&self, path: &KeyPath) -> Result<Option<Value>, StoreError> {
        let value = self.send(Method::GET, path, None).await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn set(&self, path: &KeyPath, value: Value) -> Result<(), StoreError> {
        self.send(Method::PUT, path, Some(&value)).await.map(|_| ())
    }

    async fn update(&self, path: &KeyPath, fields: Fields) -> Result<(), StoreError> {
        let body = Value::Object(fields);
        self.send(Method::PATCH, path, Some(&body)).await.map(|_| ())
    }

    async fn update_paths(&self, updates: PathUpdates) -> Result<(), StoreError> {
        if updates.is_empty() {
            return Ok(());
        }
        let body = updates_body(updates);
        self.send(Method::PATCH, &KeyPath::root(), Some(&body))
            .await
            .map(|_| ())
    }

    async fn remove(&self, path: &KeyPath) -> Result<(), StoreError> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn push(&self, path: &KeyPath, value: Value) -> Result<String, StoreError> {
        let response = self.send(Method::POST, path, Some(&value)).await?;
        response
            .get("name")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| StoreError::Serialization("push response has no name".into()))
    }
}
