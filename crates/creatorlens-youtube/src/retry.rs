//! Retry with exponential back-off and jitter for the YouTube client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Non-transient errors,
//! most importantly [`YouTubeError::QuotaExceeded`] and
//! [`YouTubeError::InvalidApiKey`], are returned immediately: retrying a
//! dead key or an exhausted daily quota only burns time.

use std::future::Future;
use std::time::Duration;

use crate::error::YouTubeError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429: the per-minute ceiling, which clears on its own.
/// - HTTP 5xx: transient server/infrastructure errors.
///
/// **Not retriable (hard stop):**
/// - [`YouTubeError::QuotaExceeded`]: daily quota; resets at midnight PT.
/// - [`YouTubeError::InvalidApiKey`]: a rejected key stays rejected.
/// - [`YouTubeError::ApiError`]: application-level error; retrying won't fix it.
/// - [`YouTubeError::ChannelNotFound`]: the channel does not exist.
/// - [`YouTubeError::Deserialize`]: malformed response; retrying won't fix it.
/// - [`YouTubeError::PaginationLimit`]: loop guard, not a transient fault.
pub(crate) fn is_retriable(err: &YouTubeError) -> bool {
    match err {
        YouTubeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        YouTubeError::RateLimited { .. } => true,
        YouTubeError::UnexpectedStatus { status, .. } => *status >= 500,
        YouTubeError::QuotaExceeded(_)
        | YouTubeError::InvalidApiKey(_)
        | YouTubeError::ApiError(_)
        | YouTubeError::ChannelNotFound { .. }
        | YouTubeError::Deserialize { .. }
        | YouTubeError::PaginationLimit { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, YouTubeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, YouTubeError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "YouTube transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_err() -> YouTubeError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        YouTubeError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn quota_exceeded_is_not_retriable() {
        assert!(!is_retriable(&YouTubeError::QuotaExceeded(
            "daily limit".to_owned()
        )));
    }

    #[test]
    fn invalid_api_key_is_not_retriable() {
        assert!(!is_retriable(&YouTubeError::InvalidApiKey(
            "key rejected".to_owned()
        )));
    }

    #[test]
    fn channel_not_found_is_not_retriable() {
        assert!(!is_retriable(&YouTubeError::ChannelNotFound {
            input: "@ghost".to_owned()
        }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&YouTubeError::RateLimited {
            retry_after_secs: 10
        }));
    }

    #[test]
    fn server_error_status_is_retriable_client_error_is_not() {
        assert!(is_retriable(&YouTubeError::UnexpectedStatus {
            status: 503,
            url: "https://example.com".to_owned()
        }));
        assert!(!is_retriable(&YouTubeError::UnexpectedStatus {
            status: 418,
            url: "https://example.com".to_owned()
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, YouTubeError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_quota_exceeded() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(YouTubeError::QuotaExceeded("Daily Limit".to_owned()))
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "QuotaExceeded must not be retried"
        );
        assert!(matches!(result, Err(YouTubeError::QuotaExceeded(_))));
    }

    #[tokio::test]
    async fn retries_rate_limited_then_succeeds() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(YouTubeError::RateLimited {
                        retry_after_secs: 0,
                    })
                } else {
                    Ok::<u32, YouTubeError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(YouTubeError::RateLimited {
                    retry_after_secs: 0,
                })
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(YouTubeError::RateLimited { .. })));
    }
}
