//! Configuration structures and defaults for the transfer engine.
//!
//! Per-download values (URL, chunk size, timeout, attempts) live in
//! [`crate::request::DownloadRequest`]. This module holds what is shared by
//! every download run through one [`crate::engine::Downloader`].

use reqwest::header::HeaderMap;
use std::time::Duration;

/// Fixed delay between a failed attempt and the next one.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);

/// Configuration structure for the downloader.
#[derive(Clone, Debug)]
pub struct DownloaderConfig {
    /// Delay inserted between failed attempts.
    pub backoff: Duration,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy for every request.
    pub proxy: Option<reqwest::Proxy>,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
            headers: None,
            proxy: None,
        }
    }
}
