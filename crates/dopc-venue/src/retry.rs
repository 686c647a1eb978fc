//! Retry with exponential back-off and jitter for venue API calls.

use std::future::Future;
use std::time::Duration;

use crate::error::VenueError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 5_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused or reset.
/// - HTTP 5xx and 429 responses.
///
/// **Not retriable:**
/// - [`VenueError::NotFound`]: the slug will not appear on a second try.
/// - Other 4xx statuses, malformed bodies, bad coordinates, bad base URL.
pub(crate) fn is_retriable(err: &VenueError) -> bool {
    match err {
        VenueError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        VenueError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
        VenueError::NotFound { .. }
        | VenueError::Deserialize { .. }
        | VenueError::InvalidBaseUrl { .. }
        | VenueError::InvalidCoordinates { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 200`:
///
/// | Retry | Sleep before it               |
/// |-------|-------------------------------|
/// | 1     | 200 ms × 2⁰ ± 25 % jitter     |
/// | 2     | 200 ms × 2¹ ± 25 % jitter     |
/// | 3     | 200 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 5 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, VenueError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VenueError>>,
{
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
                    "venue API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
