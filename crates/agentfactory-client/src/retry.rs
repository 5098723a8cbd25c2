//! Retry policy for rate-limited requests.
//!
//! Only throttling (`429`) is retried. Every other error is returned to the
//! caller unchanged on the first occurrence.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::{Error, Result};

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait when the server does not say how long to back off.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(60);

/// How long to wait between rate-limited attempts.
///
/// A positive `retry_after` from the server always takes precedence over the
/// computed value and is used exactly; jitter only applies to computed waits.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Same wait every time.
    Flat {
        /// Wait used when the server gives no hint.
        default_wait: Duration,
    },
    /// `initial * multiplier^(attempt - 1)`, capped at `max`. A non-finite
    /// multiplier counts as 1.0.
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
    },
    /// Randomly shortens the computed wait of `base` by up to `ratio`
    /// (0.0..=1.0). Server hints pass through untouched.
    Jittered { base: Box<Backoff>, ratio: f64 },
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Flat {
            default_wait: DEFAULT_WAIT,
        }
    }
}

impl Backoff {
    /// Wrap this strategy with jitter.
    pub fn jittered(self, ratio: f64) -> Self {
        Backoff::Jittered {
            base: Box::new(self),
            ratio,
        }
    }

    /// Compute the wait before the next attempt.
    ///
    /// `attempt` is the number of rate-limited attempts so far (starting at 1).
    pub fn wait(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after.filter(|d| !d.is_zero()) {
            Some(hinted) => hinted,
            None => self.computed(attempt),
        }
    }

    fn computed(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Flat { default_wait } => *default_wait,
            Backoff::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let multiplier = if multiplier.is_finite() { *multiplier } else { 1.0 };
                let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let secs = initial.as_secs_f64() * multiplier.powi(exp);
                if secs.is_nan() {
                    return *max;
                }
                Duration::try_from_secs_f64(secs.clamp(0.0, max.as_secs_f64())).unwrap_or(*max)
            }
            Backoff::Jittered { base, ratio } => {
                let wait = base.computed(attempt);
                // NaN and non-positive ratios disable jitter
                let ratio = if *ratio > 0.0 { ratio.min(1.0) } else { 0.0 };
                if ratio == 0.0 || wait.is_zero() {
                    return wait;
                }
                let upper = wait.as_secs_f64();
                let lower = upper * (1.0 - ratio);
                Duration::try_from_secs_f64(rand::rng().random_range(lower..=upper))
                    .unwrap_or(wait)
            }
        }
    }
}

/// Bounded retry loop for rate-limited operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first one.
    pub max_attempts: u32,
    /// Wait computation between attempts.
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::default(),
        }
    }
}

impl RetryPolicy {
    /// Flat waits of `default_wait` for up to `max_attempts` attempts.
    pub fn flat(max_attempts: u32, default_wait: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Flat { default_wait },
        }
    }

    /// Replace the backoff strategy.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Wait before the attempt following the `attempt`-th rate limit.
    pub fn wait_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        self.backoff.wait(attempt, retry_after)
    }

    /// Run `op`, retrying while it reports rate limiting.
    ///
    /// Returns [`Error::RetriesExhausted`] wrapping the last error once
    /// `max_attempts` rate-limited attempts have been made. `op` is never
    /// invoked more than `max_attempts` times.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_rate_limited() => {
                    attempts += 1;
                    if attempts >= max_attempts {
                        return Err(Error::RetriesExhausted {
                            attempts,
                            source: Box::new(e),
                        });
                    }

                    let wait = self.wait_for(attempts, e.retry_after());
                    tracing::warn!(
                        attempt = attempts,
                        max_attempts = max_attempts,
                        wait_secs = wait.as_secs_f64(),
                        "Rate limit exceeded, retrying"
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn rate_limited(retry_after: Option<Duration>) -> Error {
        Error::Api {
            status: 429,
            code: "rate_limited".to_string(),
            message: "Too many requests".to_string(),
            retry_after,
        }
    }

    #[test]
    fn test_flat_uses_default_without_hint() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.wait_for(1, None), Duration::from_secs(60));
        assert_eq!(policy.wait_for(2, Some(Duration::ZERO)), Duration::from_secs(60));
    }

    #[test]
    fn test_flat_uses_server_hint() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.wait_for(1, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        assert_eq!(
            policy.wait_for(1, Some(Duration::from_secs(90))),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn test_exponential_growth_is_capped() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_secs(1),
            multiplier: 2.0,
            max: Duration::from_secs(5),
        };
        assert_eq!(backoff.wait(1, None), Duration::from_secs(1));
        assert_eq!(backoff.wait(2, None), Duration::from_secs(2));
        assert_eq!(backoff.wait(3, None), Duration::from_secs(4));
        assert_eq!(backoff.wait(4, None), Duration::from_secs(5));
        assert_eq!(
            backoff.wait(4, Some(Duration::from_secs(9))),
            Duration::from_secs(9)
        );
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let backoff = Backoff::Flat {
            default_wait: Duration::from_secs(10),
        }
        .jittered(0.5);

        for attempt in 1..50 {
            let wait = backoff.wait(attempt, None);
            assert!(wait >= Duration::from_secs(5), "{:?}", wait);
            assert!(wait <= Duration::from_secs(10), "{:?}", wait);
        }
    }

    #[test]
    fn test_jitter_never_shortens_server_hint() {
        let backoff = Backoff::Flat {
            default_wait: Duration::from_secs(60),
        }
        .jittered(0.5);

        for _ in 0..200 {
            assert_eq!(
                backoff.wait(1, Some(Duration::from_secs(30))),
                Duration::from_secs(30)
            );
        }
        let unhinted = backoff.wait(1, Some(Duration::ZERO));
        assert!(unhinted >= Duration::from_secs(30) && unhinted <= Duration::from_secs(60));
    }

    #[test]
    fn test_exponential_saturates_instead_of_panicking() {
        let huge = Backoff::Exponential {
            initial: Duration::from_secs(u64::MAX),
            multiplier: 2.0,
            max: Duration::MAX,
        };
        assert_eq!(huge.wait(3, None), Duration::MAX);

        let nan = Backoff::Exponential {
            initial: Duration::from_secs(2),
            multiplier: f64::NAN,
            max: Duration::from_secs(10),
        };
        assert_eq!(nan.wait(4, None), Duration::from_secs(2));

        let jittered_nan = Backoff::Flat {
            default_wait: Duration::from_secs(5),
        }
        .jittered(f64::NAN);
        assert_eq!(jittered_nan.wait(1, None), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::default()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, Error>(42) }
            })
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_default_then_succeeds() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result = RetryPolicy::default()
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(rate_limited(None))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed().as_secs(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_honors_retry_after() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        RetryPolicy::default()
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(rate_limited(Some(Duration::from_secs(3))))
                    } else {
                        Ok(())
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(start.elapsed().as_secs(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let err = RetryPolicy::default()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(rate_limited(Some(Duration::from_secs(1)))) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            Error::RetriesExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(source.is_rate_limited());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_does_not_retry_other_errors() {
        let calls = AtomicU32::new(0);

        let err = RetryPolicy::default()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(Error::Api {
                        status: 500,
                        code: "internal".to_string(),
                        message: "boom".to_string(),
                        retry_after: None,
                    })
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(err.is_server_error());
    }
}
