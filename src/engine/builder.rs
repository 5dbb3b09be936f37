//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use ictfd::engine::DownloaderBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> ictfd::Result<()> {
//! let downloader = DownloaderBuilder::new()
//!     .backoff(Duration::from_secs(2))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig, HttpTransport, Transport};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> ictfd::Result<()> {
/// use ictfd::engine::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Sets the delay between a failed attempt and the next one.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Use a custom transport instead of the reqwest-based one.
    ///
    /// Headers and proxy settings are ignored when a transport is provided.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Set the `User-Agent` header. Invalid values are ignored.
    pub fn user_agent(self, agent: &str) -> Self {
        match HeaderValue::from_str(agent) {
            Ok(value) => self.header(USER_AGENT, value),
            Err(_) => self,
        }
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Result<Downloader> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let client = create_http_client(HttpClientConfig {
                    proxy: self.config.proxy.clone(),
                    headers: self.config.headers.clone(),
                })?;
                Arc::new(HttpTransport::new(client))
            }
        };
        Ok(Downloader::new(self.config, transport))
    }
}
