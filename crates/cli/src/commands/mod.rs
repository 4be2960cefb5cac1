//! Subcommand implementations.

pub mod buddy;
pub mod event;
pub mod goal;
pub mod journal;
pub mod onboard;
pub mod post;
pub mod status;
pub mod task;
pub mod user;

use ascend_config::AppConfig;
use ascend_data::Repository;
use ascend_store::open_from_config;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the configured store and wrap it in a repository.
pub fn open_repository(config: &AppConfig) -> Result<Repository, Box<dyn std::error::Error>> {
    let store = open_from_config(&config.store).map_err(|e| format!("Failed to open store: {e}"))?;
    Ok(Repository::new(store))
}

/// Reject blank input before anything is written.
pub fn require_text(value: &str, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if value.trim().is_empty() {
        return Err(format!("{what} cannot be empty").into());
    }
    Ok(())
}

/// Parse a `key=value` pair. The value is read as JSON when it parses,
/// otherwise kept as a string.
pub fn parse_field(pair: &str) -> Result<(String, serde_json::Value), String> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{pair}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::from(raw));
    Ok((key.to_string(), value))
}

/// A short local rendering of an optional timestamp.
pub fn show_time(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}
