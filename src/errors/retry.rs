use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::classification::ErrorClassification;
use super::types::ConsoleError;

impl ErrorClassification {
    /// Backoff before the next attempt (0-indexed): `base * 2^attempt` plus
    /// up to one `base` of random jitter, capped at `max`.
    pub fn retry_delay(&self, attempt: u32, config: &RetryConfig) -> Duration {
        let base = config.base_delay_ms as f64;
        let backoff = base * 2.0_f64.powi(attempt as i32);
        let jitter = base * rand::random::<f64>();
        let millis = (backoff + jitter).min(config.max_delay_ms as f64);
        Duration::from_secs_f64(millis / 1000.0)
    }
}

/// Retry configuration for backend calls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no backoff.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, ConsoleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ConsoleError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut last_error = None;

    for attempt in 0..max_attempts {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable || attempt + 1 >= max_attempts {
                    if !classification.retryable {
                        warn!(
                            operation = operation_name,
                            error_type = classification.error_type,
                            "Non-retryable error, failing immediately"
                        );
                    } else {
                        warn!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            max = max_attempts,
                            "Max retries exhausted"
                        );
                    }
                    return Err(e);
                }

                let delay = classification.retry_delay(attempt, config);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ConsoleError::Internal("Retry loop exited unexpectedly".into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast() -> RetryConfig {
        RetryConfig { max_retries: 2, base_delay_ms: 1, max_delay_ms: 5 }
    }

    #[test]
    fn test_retry_delay_capped() {
        let class = ErrorClassification { error_type: "NetworkError", retryable: true };
        let config = RetryConfig { max_retries: 5, base_delay_ms: 100, max_delay_ms: 250 };
        assert!(class.retry_delay(0, &config) <= Duration::from_millis(200));
        assert_eq!(class.retry_delay(6, &config), Duration::from_millis(250));
    }

    #[test]
    fn test_retry_delay_exponential() {
        let class = ErrorClassification { error_type: "UnavailableError", retryable: true };
        let config = RetryConfig { max_retries: 5, base_delay_ms: 100, max_delay_ms: 10_000 };
        let d0 = class.retry_delay(0, &config).as_millis();
        let d2 = class.retry_delay(2, &config).as_millis();
        assert!((100..=200).contains(&d0));
        assert!((400..=500).contains(&d2));
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let result = with_retry("test", &fast(), || async {
            Ok::<_, ConsoleError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_after_unavailable() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(), || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ConsoleError::Unavailable("503".into()))
                } else {
                    Ok(7)
                }
            }
        }).await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ConsoleError::Rejected("bad group".into()))
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_bounded() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ConsoleError::Network("reset".into()))
            }
        }).await;

        assert!(matches!(result, Err(ConsoleError::Network(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_none_config_single_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let _ = with_retry("test", &RetryConfig::none(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ConsoleError::Timeout("slow".into()))
            }
        }).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
