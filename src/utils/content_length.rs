//! Response header helpers.
//!
//! This module extracts the expected body size and the content type from a
//! response header map. Both work on a plain [`HeaderMap`] so that any
//! [`crate::http::Transport`] implementation can use them.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};

/// Extract the expected body size from the Content-Length header.
///
/// Returns 0 when the header is missing or is not a valid `u64`, which the
/// engine treats as "size unknown".
///
/// # Example
///
/// ```rust
/// use ictfd::utils::content_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(content_length(&headers), 2048);
/// ```
pub fn content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Extract the Content-Type header as a string, if present and printable.
pub fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
