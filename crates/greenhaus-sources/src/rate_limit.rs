//! Retry utilities shared by the remote product source clients.
//!
//! Transient failures (429 responses, network errors, 5xx) are retried with
//! exponential backoff plus a small random jitter. Everything else propagates
//! immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::SourceError;

/// Upper bound of the random jitter added to each backoff delay.
const MAX_JITTER_MS: u64 = 250;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`SourceError::RateLimited`]: HTTP 429; the store asked us to back off.
/// - [`SourceError::Http`]: network-level failure (connection reset, timeout).
/// - [`SourceError::UnexpectedStatus`] with a 5xx status.
///
/// Not-found, 4xx, deserialization, pagination and local I/O errors are
/// returned immediately; retrying would not change the outcome.
fn is_retriable(err: &SourceError) -> bool {
    match err {
        SourceError::RateLimited { .. } | SourceError::Http(_) => true,
        SourceError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds plus up to 250ms of jitter. A zero base disables both the delay
/// and the jitter.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        let delay = backoff_delay(backoff_base_secs, attempt);
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %last_err,
            "transient source error; retrying after backoff"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}

fn backoff_delay(backoff_base_secs: u64, attempt: u32) -> Duration {
    if backoff_base_secs == 0 {
        return Duration::ZERO;
    }
    let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    let jitter_ms = rand::rng().random_range(0..=MAX_JITTER_MS);
    Duration::from_secs(delay_secs).saturating_add(Duration::from_millis(jitter_ms))
}
