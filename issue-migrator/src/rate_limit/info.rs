//! Rate limit information.

use http::HeaderMap;

/// Rate limit state reported alongside an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Reads the `x-ratelimit-*` headers of a response.
    ///
    /// Returns `None` unless both the remaining count and the reset time are
    /// present and numeric.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_number(headers, "x-ratelimit-remaining")?;
        let reset = header_number(headers, "x-ratelimit-reset")?;
        let limit = header_number(headers, "x-ratelimit-limit").unwrap_or(remaining);

        Some(Self {
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
            reset,
            limit: u32::try_from(limit).unwrap_or(u32::MAX),
        })
    }
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn reads_github_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("5000"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4987"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1372700873"));

        let info = RateLimitInfo::from_headers(&headers).unwrap();

        assert_eq!(
            info,
            RateLimitInfo {
                remaining: 4987,
                reset: 1372700873,
                limit: 5000,
            }
        );
    }

    #[test]
    fn missing_headers_yield_none() {
        let mut headers = HeaderMap::new();
        assert!(RateLimitInfo::from_headers(&headers).is_none());

        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("abc"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1"));
        assert!(RateLimitInfo::from_headers(&headers).is_none());
    }
}
