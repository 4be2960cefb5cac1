//! Chat-completion providers for Ascend.
//!
//! All providers implement the `ascend_core::Provider` trait.
//! [`build_from_config`] assembles the configured client and its retry policy.

pub mod openai_compat;
pub mod retry;

pub use openai_compat::OpenAiCompatProvider;
pub use retry::RetryProvider;

use ascend_config::AppConfig;
use ascend_core::Provider;
use ascend_core::error::ProviderError;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Build the completion provider described by `config`.
///
/// Fails with `NotConfigured` when no API key is available.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .provider
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            ProviderError::NotConfigured(
                "No API key. Set provider.api_key or OPENAI_API_KEY".into(),
            )
        })?;

    let client = OpenAiCompatProvider::new(
        "openai",
        config.provider.api_url.as_str(),
        api_key,
        Duration::from_secs(config.provider.timeout_secs),
    )?;

    debug!(
        url = %config.provider.api_url,
        model = %config.provider.model,
        max_attempts = config.retry.max_attempts,
        "Completion provider ready"
    );

    Ok(Arc::new(RetryProvider::new(Arc::new(client), &config.retry)))
}
