//! Retry with exponential backoff for the alkoteka API client.
//!
//! 429 responses, server errors and network failures are retried.
//! Everything else (parse failures, 404s, other 4xx) is returned at once.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable: [`ScraperError::RateLimited`], [`ScraperError::Http`] and
/// [`ScraperError::UnexpectedStatus`] with a 5xx status.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Seconds to wait before retry number `attempt + 1`.
///
/// A 429 with a longer `Retry-After` than the backoff waits for the server's
/// value instead. A zero base never waits.
fn backoff_delay_secs(err: &ScraperError, attempt: u32, backoff_base_secs: u64) -> u64 {
    let exponential = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } if backoff_base_secs > 0 => exponential.max(*retry_after_secs),
        _ => exponential,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On success the result is returned immediately.
///
/// On a retriable error the function sleeps for `backoff_base_secs * 2^attempt`
/// seconds (or the server's `Retry-After`, if longer) and tries again,
/// up to `max_retries` additional attempts after the first try. If all retries are
/// exhausted the last error is returned.
///
/// Non-retriable errors are returned immediately without sleeping or retrying.
///
/// # Backoff schedule (example with `backoff_base_secs = 1`)
///
/// | Attempt | Sleep before next attempt |
/// |---------|--------------------------|
/// | 0 (initial) | none |
/// | 1 (first retry) | 1 × 2^0 = 1 s |
/// | 2 (second retry) | 1 × 2^1 = 2 s |
/// | 3 (third retry) | 1 × 2^2 = 4 s |
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
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

        let delay_secs = backoff_delay_secs(&last_err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient API error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
