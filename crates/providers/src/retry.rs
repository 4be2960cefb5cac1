//! Bounded retry around a single provider.
//!
//! Transient failures (network, rate limit, 5xx) are retried with jittered
//! exponential backoff. Anything else is returned immediately. With
//! `max_attempts = 1` the wrapper is a pass-through.

use async_trait::async_trait;
use ascend_config::RetryConfig;
use ascend_core::error::ProviderError;
use ascend_core::provider::*;
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A provider that retries transient failures of the provider it wraps.
pub struct RetryProvider {
    inner: Arc<dyn ascend_core::Provider>,
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryProvider {
    pub fn new(inner: Arc<dyn ascend_core::Provider>, config: &RetryConfig) -> Self {
        Self {
            inner,
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms.max(config.base_delay_ms)),
        }
    }

    /// Total tries per request, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts as usize - 1)
            .with_jitter()
    }
}

#[async_trait]
impl ascend_core::Provider for RetryProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        (|| async { self.inner.complete(request.clone()).await })
            .retry(self.backoff())
            .when(|e: &ProviderError| e.is_transient())
            .notify(|e, dur| {
                warn!(
                    provider = %self.inner.name(),
                    delay_ms = dur.as_millis() as u64,
                    error = %e,
                    "Transient provider failure, retrying"
                )
            })
            .await
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascend_core::Provider;
    use ascend_core::message::Message;
    use std::sync::Mutex;

    /// Fails with the queued errors in order, then succeeds.
    struct FlakyProvider {
        errors: Mutex<Vec<ProviderError>>,
        call_count: Mutex<usize>,
    }

    impl FlakyProvider {
        fn new(mut errors: Vec<ProviderError>) -> Self {
            errors.reverse();
            Self {
                errors: Mutex::new(errors),
                call_count: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl ascend_core::Provider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            *self.call_count.lock().unwrap() += 1;
            match self.errors.lock().unwrap().pop() {
                Some(e) => Err(e),
                None => Ok(ProviderResponse {
                    message: Message::assistant("success"),
                    usage: None,
                    model: "test-model".into(),
                }),
            }
        }
    }

    fn test_request() -> ProviderRequest {
        ProviderRequest {
            model: "test".into(),
            messages: vec![Message::user("hello")],
            temperature: Some(0.7),
            max_tokens: None,
        }
    }

    fn retry_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay_ms: 10,
            max_delay_ms: 40,
        }
    }

    fn server_error() -> ProviderError {
        ProviderError::ApiError {
            status_code: 503,
            message: "overloaded".into(),
        }
    }

    #[tokio::test]
    async fn single_attempt_is_pass_through() {
        let inner = Arc::new(FlakyProvider::new(vec![server_error()]));
        let retry = RetryProvider::new(inner.clone(), &retry_config(1));

        let result = retry.complete(test_request()).await;
        assert!(result.is_err());
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_until_success() {
        let inner = Arc::new(FlakyProvider::new(vec![
            ProviderError::Network("reset".into()),
            server_error(),
        ]));
        let retry = RetryProvider::new(inner.clone(), &retry_config(3));

        let result = retry.complete(test_request()).await;
        assert_eq!(result.unwrap().message.content, "success");
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let inner = Arc::new(FlakyProvider::new(vec![
            server_error(),
            server_error(),
            server_error(),
        ]));
        let retry = RetryProvider::new(inner.clone(), &retry_config(2));

        let result = retry.complete(test_request()).await;
        match result.unwrap_err() {
            ProviderError::ApiError { status_code, .. } => assert_eq!(status_code, 503),
            other => panic!("Expected ApiError, got: {other:?}"),
        }
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let inner = Arc::new(FlakyProvider::new(vec![
            ProviderError::AuthenticationFailed("bad key".into()),
        ]));
        let retry = RetryProvider::new(inner.clone(), &retry_config(5));

        let result = retry.complete(test_request()).await;
        assert!(matches!(
            result.unwrap_err(),
            ProviderError::AuthenticationFailed(_)
        ));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_is_retried() {
        let inner = Arc::new(FlakyProvider::new(vec![ProviderError::RateLimited {
            retry_after_secs: 1,
        }]));
        let retry = RetryProvider::new(inner.clone(), &retry_config(2));

        assert!(retry.complete(test_request()).await.is_ok());
        assert_eq!(inner.calls(), 2);
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let inner = Arc::new(FlakyProvider::new(vec![]));
        let retry = RetryProvider::new(inner, &retry_config(0));
        assert_eq!(retry.max_attempts(), 1);
        assert_eq!(retry.name(), "flaky");
    }
}
