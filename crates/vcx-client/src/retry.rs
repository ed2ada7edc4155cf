//! Retry logic with exponential backoff for collaborator fetches.
//!
//! Retries only on transport errors (connection failures, timeouts).
//! Responses of any status, including 4xx and 5xx, are returned to the
//! caller without retry. The number of retries comes from configuration and
//! defaults to zero.

use std::time::Duration;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms, ...).
const BASE_DELAY_MS: u64 = 200;

/// Upper bound on a single backoff delay.
const MAX_DELAY_MS: u64 = 5_000;

/// Send an HTTP request, retrying transport failures up to `max_retries`
/// times after the first attempt.
pub(crate) async fn retry_send<F, Fut>(
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..max_retries {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = backoff(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    // Final attempt, no more retries.
    f().await
}

fn backoff(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(factor).min(MAX_DELAY_MS))
}
