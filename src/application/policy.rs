use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

use crate::domain::DomainError;

/// Timeout and retry settings for one external collaborator.
///
/// Retries are off unless configured; only `ExternalService` and `Timeout`
/// failures are retried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallPolicy {
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub retry_backoff_ms: u64,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl CallPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_retries(mut self, max_retries: usize, retry_backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }

    /// Runs `call`, bounding each attempt by the timeout.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let timeout = self.timeout();
        let strategy = FixedInterval::from_millis(self.retry_backoff_ms).take(self.max_retries);

        RetryIf::spawn(
            strategy,
            || bounded(timeout, operation, call()),
            |e: &DomainError| {
                let retryable = e.is_retryable();
                if retryable {
                    tracing::warn!(operation, error = %e, "external call failed");
                }
                retryable
            },
        )
        .await
    }

    /// Runs `call` exactly once under the timeout. For calls with side
    /// effects that must not be repeated, such as publishing.
    pub async fn run_once<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        bounded(self.timeout(), operation, call()).await
    }
}

async fn bounded<T, Fut>(timeout: Duration, operation: &str, attempt: Fut) -> Result<T, DomainError>
where
    Fut: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::timeout(format!(
            "{operation} exceeded {}s",
            timeout.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_run_without_retries_fails_once() {
        let calls = AtomicUsize::new(0);
        let policy = CallPolicy::default();

        let result: Result<(), _> = policy
            .run("embed", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(DomainError::external("503")) }
            })
            .await;

        assert!(matches!(result, Err(DomainError::ExternalService(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_retries_transient_failures() {
        let calls = AtomicUsize::new(0);
        let policy = CallPolicy::default().with_retries(2, 0);

        let result = policy
            .run("generate", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(DomainError::external("overloaded"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_validation_errors() {
        let calls = AtomicUsize::new(0);
        let policy = CallPolicy::default().with_retries(3, 0);

        let result: Result<(), _> = policy
            .run("post", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(DomainError::validation("text too long")) }
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out_slow_calls() {
        let policy = CallPolicy::default().with_timeout(1);

        let result: Result<(), _> = policy
            .run("generate", || async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_run_once_ignores_retry_budget() {
        let calls = AtomicUsize::new(0);
        let policy = CallPolicy::default().with_retries(3, 0);

        let result: Result<(), _> = policy
            .run_once("publish post", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(DomainError::external("503")) }
            })
            .await;

        assert!(matches!(result, Err(DomainError::ExternalService(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_once_times_out() {
        let policy = CallPolicy::default().with_timeout(1).with_retries(2, 0);

        let result: Result<(), _> = policy
            .run_once("publish post", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::Timeout(_))));
    }

    #[test]
    fn test_deserialize_partial_policy() {
        let policy: CallPolicy = serde_yaml::from_str("max_retries: 2").unwrap();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.timeout_seconds, 30);
        assert_eq!(policy.retry_backoff_ms, 500);
    }
}
