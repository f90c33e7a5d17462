//! Retry with exponential backoff for storefront requests.
//!
//! Transient failures (HTTP 429, network errors) are retried; everything
//! else is returned to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single backoff sleep.
const MAX_DELAY_SECS: u64 = 120;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ScraperError::RateLimited`]: HTTP 429, the shop asked us to back off.
/// - [`ScraperError::Http`]: network-level failure (connection reset, timeout).
///
/// Everything else (404, other statuses, unparsable bodies, pagination
/// guards) would fail the same way again.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::Http(_)
    )
}

/// Delay before retry number `attempt` (0-based).
///
/// `backoff_base_secs * 2^attempt`, never shorter than a server-supplied
/// `Retry-After`, capped at [`MAX_DELAY_SECS`], with ±25% jitter.
fn backoff_delay(backoff_base_secs: u64, attempt: u32, err: &ScraperError) -> Duration {
    let computed = backoff_base_secs.saturating_mul(1u64 << attempt.min(16));
    let floor = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => *retry_after_secs,
        _ => 0,
    };
    let capped_ms = computed.max(floor).min(MAX_DELAY_SECS).saturating_mul(1000);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered_ms = (capped_ms as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    Duration::from_millis(jittered_ms)
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
/// If all retries are exhausted the last error is returned.
///
/// | Attempt | Sleep before next attempt (`backoff_base_secs = 5`) |
/// |---------|------------------------------------------------------|
/// | 1st retry | 5 s × 2⁰ ± 25 % |
/// | 2nd retry | 5 s × 2¹ ± 25 % |
/// | 3rd retry | 5 s × 2² ± 25 % |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                let delay = backoff_delay(backoff_base_secs, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient storefront error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited(retry_after_secs: u64) -> ScraperError {
        ScraperError::RateLimited {
            domain: "shop.example.dk".to_owned(),
            retry_after_secs,
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ScraperError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_on_rate_limited_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited(0))
                } else {
                    Ok::<u32, ScraperError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScraperError>(rate_limited(0))
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ScraperError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScraperError>(ScraperError::NotFound {
                    url: "https://shop.example.dk/products.json".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
    }

    #[test]
    fn backoff_honours_retry_after_and_cap() {
        let delay = backoff_delay(0, 0, &rate_limited(8));
        assert!(delay >= Duration::from_secs(6), "got {delay:?}");
        assert!(delay <= Duration::from_secs(10), "got {delay:?}");

        let capped = backoff_delay(60, 10, &rate_limited(0));
        assert!(capped <= Duration::from_secs(MAX_DELAY_SECS * 5 / 4));
    }

    #[test]
    fn backoff_is_zero_with_zero_base() {
        let not_found = ScraperError::NotFound { url: String::new() };
        assert_eq!(backoff_delay(0, 3, &not_found), Duration::ZERO);
    }

    #[test]
    fn only_rate_limits_and_network_errors_retry() {
        assert!(is_retriable(&rate_limited(1)));
        assert!(!is_retriable(&ScraperError::UnexpectedStatus {
            status: 500,
            url: String::new()
        }));
        assert!(!is_retriable(&ScraperError::NoStoreApi {
            domain: "x.dk".to_owned()
        }));
    }
}
