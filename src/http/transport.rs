//! The transport seam used by the transfer engine.
//!
//! The engine only needs to "open a GET request with a timeout and stream the
//! body". [`Transport`] captures that contract so the engine can be driven by
//! the reqwest-based [`HttpTransport`] in production and by scripted doubles in
//! tests.

use crate::error::{Error, Result};
use crate::utils::{content_length, content_type};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::{header::HeaderMap, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// An opened response: status, headers and a streamed body.
pub struct TransferResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BoxStream<'static, Result<Bytes>>,
}

impl TransferResponse {
    /// Expected body size, 0 when unknown.
    pub fn total_size(&self) -> u64 {
        content_length(&self.headers)
    }

    pub fn content_type(&self) -> Option<String> {
        content_type(&self.headers)
    }

    /// Status line such as `200 OK`.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}

impl fmt::Debug for TransferResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Capability to open a streamed GET request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET for `url` and waits at most `timeout` for the response head.
    ///
    /// Implementations must report connection failures, timeouts and
    /// non-success statuses as retriable errors (see [`Error::is_retriable`]).
    async fn open(&self, url: &Url, timeout: Duration) -> Result<TransferResponse>;
}

/// Production [`Transport`] on top of a reqwest-middleware client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
}

impl HttpTransport {
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&self, url: &Url, timeout: Duration) -> Result<TransferResponse> {
        debug!("Fetching {}", url);
        let response = tokio::time::timeout(timeout, self.client.get(url.clone()).send())
            .await
            .map_err(|_| Error::Timeout(timeout))??;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status));
        }

        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map(|item| item.map_err(Error::from))
            .boxed();

        Ok(TransferResponse {
            status,
            headers,
            body,
        })
    }
}
