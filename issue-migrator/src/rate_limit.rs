//! Rate limiting utilities for GitHub API.
//!
//! Every response carries the caller's remaining request budget. When it runs
//! low the client sleeps until the window resets instead of letting the next
//! request fail mid-migration.

mod info;

pub use info::RateLimitInfo;

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Computes how long to sleep given the rate limit state at `now` (Unix seconds).
///
/// Returns `None` when enough requests remain or the window already reset.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(remaining: u32, reset: u64) -> RateLimitInfo {
        RateLimitInfo {
            remaining,
            reset,
            limit: 5000,
        }
    }

    #[test]
    fn no_wait_with_budget_left() {
        assert_eq!(wait_duration(&info(100, 2_000), 1_000), None);
        assert_eq!(wait_duration(&info(MIN_REMAINING_THRESHOLD, 2_000), 1_000), None);
    }

    #[test]
    fn no_wait_when_reset_passed() {
        assert_eq!(wait_duration(&info(0, 500), 1_000), None);
    }

    #[test]
    fn waits_until_reset() {
        assert_eq!(
            wait_duration(&info(1, 1_030), 1_000),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn caps_wait_time() {
        assert_eq!(
            wait_duration(&info(0, 1_000 + MAX_WAIT_SECS * 2), 1_000),
            Some(Duration::from_secs(MAX_WAIT_SECS))
        );
    }

    #[tokio::test]
    async fn test_wait_if_needed_no_wait() {
        let waited = wait_if_needed(&info(100, 0)).await;
        assert!(!waited);
    }
}
