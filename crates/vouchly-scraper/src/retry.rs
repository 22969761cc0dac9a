//! Fixed-backoff retry for page fetches.
//!
//! Marketplace pages fail transiently (connection resets, 5xx interludes);
//! the budget is a small fixed number of attempts with a constant pause
//! between them. Non-retriable errors (4xx, anti-bot interstitials, parse
//! failures) are propagated immediately without retrying.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after the backoff pause.
///
/// Retriable errors:
/// - [`ScrapeError::Http`]: network-level failure (connection reset, timeout, etc.).
/// - [`ScrapeError::UnexpectedStatus`] with a 5xx status: upstream hiccup.
///
/// Non-retriable errors (propagated immediately):
/// - [`ScrapeError::UnexpectedStatus`] with a 4xx status: retrying returns the same result.
/// - [`ScrapeError::Blocked`]: an anti-bot interstitial answers retries with more interstitials.
/// - [`ScrapeError::Deserialize`]: response body does not parse; retrying won't fix it.
fn is_retriable(err: &ScrapeError) -> bool {
    match err {
        ScrapeError::Http(_) => true,
        ScrapeError::UnexpectedStatus { status, .. } => *status >= 500,
        ScrapeError::Blocked { .. } | ScrapeError::Deserialize { .. } => false,
    }
}

/// Executes `operation` up to `attempts` times total, sleeping a constant
/// `backoff_secs` between tries.
///
/// On success the result is returned immediately. On a retriable error the
/// function sleeps and tries again until the budget is spent, then returns
/// the last error. Non-retriable errors are returned without sleeping.
///
/// `attempts` counts every try including the first; `0` is treated as `1`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    attempts: u32,
    backoff_secs: u64,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    attempts,
                    backoff_secs,
                    error = %err,
                    "transient fetch error; retrying after backoff"
                );
            }
        }

        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
        attempt += 1;
    }
}
