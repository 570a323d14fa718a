//! A bounded retry policy with linear backoff for single store writes.

use std::{fmt::Display, future::Future, time::Duration};

/// How many times to attempt a store write and how long to wait in between.
///
/// The wait before retry `n` is `base_delay * n`, so the default policy of
/// three attempts with a two second base waits 2s and then 4s.
///
/// The policy is injected into the access layer rather than hard-coded so
/// tests can swap in a single-attempt policy or drive the waits with a
/// paused clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Must be at least 1.
    pub max_attempts: u32,
    /// Base wait between attempts, scaled linearly by the attempt number.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// The wait after `attempt` attempts have failed (1-based).
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Run `operation` until it succeeds or `policy.max_attempts` is exhausted,
/// sleeping between attempts.
///
/// Failed attempts are logged at the warn level. The error returned is the
/// one from the final attempt.
pub(crate) async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts => {
                tracing::warn!(
                    "attempt {attempt}/{} failed, retrying: {error}",
                    policy.max_attempts
                );
                tokio::time::sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod retry_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{RetryPolicy, retry};

    fn counting_operation(
        calls: Arc<AtomicUsize>,
        fail_first: usize,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, String>> {
        move || {
            let call = calls.fetch_add(1, Ordering::Relaxed);
            if call < fail_first {
                std::future::ready(Err(format!("simulated failure #{call}")))
            } else {
                std::future::ready(Ok(42))
            }
        }
    }

    #[tokio::test]
    async fn returns_first_success_without_waiting() {
        let calls = Arc::new(AtomicUsize::new(0));

        let got = retry(&RetryPolicy::default(), counting_operation(calls.clone(), 0)).await;

        assert_eq!(got, Ok(42));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));

        let got = retry(&RetryPolicy::default(), counting_operation(calls.clone(), 2)).await;

        assert_eq!(got, Ok(42));
        assert_eq!(calls.load(Ordering::Relaxed), 3, "want three attempts");
    }

    #[tokio::test(start_paused = true)]
    async fn surfaces_last_error_when_attempts_are_exhausted() {
        let calls = Arc::new(AtomicUsize::new(0));

        let got = retry(&RetryPolicy::default(), counting_operation(calls.clone(), 5)).await;

        assert_eq!(got, Err("simulated failure #2".to_owned()));
        assert_eq!(calls.load(Ordering::Relaxed), 3, "want three attempts");
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_is_linear() {
        let calls = Arc::new(AtomicUsize::new(0));
        let start = Instant::now();

        let _ = retry(&RetryPolicy::default(), counting_operation(calls, 5)).await;

        // Two waits with the default policy: 2s after the first failure and
        // 4s after the second.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test]
    async fn no_retries_policy_makes_a_single_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));

        let got = retry(
            &RetryPolicy::no_retries(),
            counting_operation(calls.clone(), 5),
        )
        .await;

        assert_eq!(got, Err("simulated failure #0".to_owned()));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
