//! Bounded retry with exponential backoff for single provider calls.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::{Result, SearchError};

/// Retry policy for one provider call.
///
/// The delay after failed attempt `n` (1-based) is `base * 2^(n-1)`,
/// capped at `max_delay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay after the first failure, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Backoff to wait after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(32);
        let delay = self.base_delay_ms.saturating_mul(1u64 << exp);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// Runs `op` until it succeeds or the attempts run out. Each attempt is
    /// bounded by `per_attempt`; an elapsed deadline counts as a failure.
    /// Configuration errors are returned without retrying.
    pub async fn run<T, F, Fut>(&self, label: &str, per_attempt: Duration, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let err = match timeout(per_attempt, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => e,
                Err(_) => SearchError::Timeout,
            };
            if attempt >= attempts || err.is_configuration() {
                return Err(err);
            }
            let delay = self.delay_for(attempt);
            debug!(
                provider = label,
                attempt,
                error = %err,
                delay_ms = delay.as_millis() as u64,
                "retrying provider call"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 1_000);
        assert_eq!(policy.max_delay_ms, 10_000);
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
        assert_eq!(policy.delay_for(5), Duration::from_secs(10));
        assert_eq!(policy.delay_for(60), Duration::from_secs(10));
    }

    #[test]
    fn test_policy_deserialization_defaults() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts":5}"#).unwrap();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay_ms, 1_000);
    }

    #[tokio::test]
    async fn test_run_succeeds_first_time() {
        let calls = AtomicU32::new(0);
        let value = assert_ok!(
            fast(3)
                .run("p", Duration::from_secs(1), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, SearchError>(7)
                })
                .await
        );
        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_retries_until_success() {
        let calls = AtomicU32::new(0);
        let value = fast(3)
            .run("p", Duration::from_secs(1), || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(SearchError::Other("flaky".into()))
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast(3)
            .run("p", Duration::from_secs(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SearchError::Other("down".into()))
            })
            .await;
        let err = assert_err!(result);
        assert!(matches!(err, SearchError::Other(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_times_out_hanging_call() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast(2)
            .run("p", Duration::from_millis(10), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::pending::<Result<()>>().await
            })
            .await;
        assert!(matches!(result, Err(SearchError::Timeout)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_none_policy_runs_once() {
        let calls = AtomicU32::new(0);
        let _: Result<()> = RetryPolicy::none()
            .run("p", Duration::from_secs(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SearchError::Timeout)
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
