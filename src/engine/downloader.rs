//! Core transfer engine.
//!
//! [`Downloader::execute`] runs one [`DownloadRequest`] to completion: it
//! checks for an existing file, then drives up to `retries` attempts, each of
//! which opens the URL, truncates the destination and streams the body into it
//! chunk by chunk. Transport failures are retried after a fixed backoff, disk
//! failures are fatal, and a [`CancelToken`] can interrupt the whole thing at
//! chunk granularity.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ictfd::engine::{CancelToken, DownloaderBuilder};
//! use ictfd::request::resolve;
//! use ictfd::Outcome;
//!
//! # async fn example() -> ictfd::Result<()> {
//! let request = resolve("https://example.com/file.zip", "downloads", None, None, None)?;
//! let downloader = DownloaderBuilder::new().build()?;
//! let cancel = CancelToken::new();
//!
//! let outcome = downloader
//!     .execute(&request, |_path| true, |event| println!("{:?}", event), &cancel)
//!     .await;
//! assert!(matches!(outcome, Outcome::Completed { .. }));
//! # Ok(())
//! # }
//! ```

use super::cancel::CancelToken;
use super::chunker::ChunkReader;
use super::config::DownloaderConfig;
use super::state::TransferState;
use crate::error::{Error, Result};
use crate::event::{Outcome, ProgressEvent};
use crate::http::Transport;
use crate::request::{DownloadRequest, ExistingFilePolicy};

use reqwest::{header::HeaderMap, Url};
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, warn};

/// Represents the transfer engine.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> ictfd::Result<()> {
/// use ictfd::engine::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    transport: Arc<dyn Transport>,
}

/// How a single attempt ended, when it did not fail.
enum AttemptEnd {
    Completed,
    Canceled,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Gets the delay between failed attempts.
    pub fn backoff(&self) -> Duration {
        self.config.backoff
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Downloads `request`, reporting every step to `on_event`.
    ///
    /// `confirm_overwrite` is only called when the target file already exists
    /// and the request policy is [`ExistingFilePolicy::Ask`]; returning `false`
    /// cancels before any network activity.
    ///
    /// Only [`Outcome::Completed`] leaves a file behind. On cancellation or
    /// failure, whatever this call wrote is removed.
    pub async fn execute<C, E>(
        &self,
        request: &DownloadRequest,
        confirm_overwrite: C,
        mut on_event: E,
        cancel: &CancelToken,
    ) -> Outcome
    where
        C: FnOnce(&Path) -> bool,
        E: FnMut(ProgressEvent),
    {
        let path = request.final_path();

        if path.exists() && !may_overwrite(request.policy(), &path, confirm_overwrite) {
            info!("Keeping existing file {:?}", path);
            on_event(ProgressEvent::Canceled {
                partial_file_deleted: false,
            });
            return Outcome::Canceled;
        }

        let max_attempts = request.retries();
        let mut state = TransferState::new();
        let mut touched = false;
        let mut attempt = 1;

        loop {
            state.reset(attempt);
            debug!("Attempt {}/{} for {}", attempt, max_attempts, request.url());

            let result = self
                .attempt(request, &path, &mut state, &mut touched, &mut on_event, cancel)
                .await;

            match result {
                Ok(AttemptEnd::Completed) => {
                    let elapsed = state.elapsed();
                    info!(
                        "Downloaded {} bytes to {:?} in {:?}",
                        state.bytes_downloaded(),
                        path,
                        elapsed
                    );
                    on_event(ProgressEvent::Completed {
                        elapsed,
                        final_path: path.clone(),
                    });
                    return Outcome::Completed {
                        path,
                        bytes: state.bytes_downloaded(),
                        elapsed,
                    };
                }
                Ok(AttemptEnd::Canceled) => {
                    return cancel_download(&path, touched, &mut on_event).await;
                }
                Err(e) if e.is_retriable() => {
                    let will_retry = attempt < max_attempts;
                    warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                    on_event(ProgressEvent::AttemptFailed {
                        attempt,
                        max_attempts,
                        error: e.to_string(),
                        will_retry,
                    });

                    if !will_retry {
                        discard_partial(&path, touched).await;
                        return Outcome::Failed(Error::MaxRetriesExceeded {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }

                    debug!("Retrying in {:?}", self.config.backoff);
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            return cancel_download(&path, touched, &mut on_event).await;
                        }
                        _ = tokio::time::sleep(self.config.backoff) => {}
                    }
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Download of {} aborted: {}", request.url(), e);
                    discard_partial(&path, touched).await;
                    return Outcome::Failed(e);
                }
            }
        }
    }

    /// Runs one attempt: open, truncate, stream.
    async fn attempt<E>(
        &self,
        request: &DownloadRequest,
        path: &Path,
        state: &mut TransferState,
        touched: &mut bool,
        on_event: &mut E,
        cancel: &CancelToken,
    ) -> Result<AttemptEnd>
    where
        E: FnMut(ProgressEvent),
    {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(AttemptEnd::Canceled),
            response = self.transport.open(request.url(), request.timeout()) => response?,
        };

        let total_size = response.total_size();
        state.set_total_size(total_size);
        on_event(ProgressEvent::Started {
            url: request.url().to_string(),
            resolved_host: netloc(request.url()),
            total_size,
            content_type: response.content_type(),
            status: response.status_line(),
        });

        debug!("Creating destination file {:?}", path);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?;
        *touched = true;

        debug!("Retrieving chunks...");
        let mut reader = ChunkReader::new(response.body, request.chunk_size(), request.timeout());
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                next = reader.next_chunk() => Some(next),
            };
            let chunk = match next {
                None => {
                    let _ = file.flush().await;
                    return Ok(AttemptEnd::Canceled);
                }
                Some(None) => break,
                Some(Some(Err(e))) => {
                    // Let pending writes land before the next attempt truncates.
                    let _ = file.flush().await;
                    return Err(e);
                }
                Some(Some(Ok(chunk))) => chunk,
            };

            file.write_all(&chunk).await?;
            on_event(state.record(chunk.len() as u64));
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(AttemptEnd::Completed)
    }
}

fn may_overwrite<C>(policy: ExistingFilePolicy, path: &Path, confirm_overwrite: C) -> bool
where
    C: FnOnce(&Path) -> bool,
{
    match policy {
        ExistingFilePolicy::Overwrite => true,
        ExistingFilePolicy::Skip => false,
        ExistingFilePolicy::Ask => confirm_overwrite(path),
    }
}

async fn cancel_download<E>(path: &Path, touched: bool, on_event: &mut E) -> Outcome
where
    E: FnMut(ProgressEvent),
{
    info!("Download canceled");
    let partial_file_deleted = discard_partial(path, touched).await;
    on_event(ProgressEvent::Canceled {
        partial_file_deleted,
    });
    Outcome::Canceled
}

/// Removes the destination if this run created or truncated it.
async fn discard_partial(path: &Path, touched: bool) -> bool {
    if !touched {
        return false;
    }
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!("Deleted incomplete file {:?}", path);
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Could not delete incomplete file {:?}: {}", path, e);
            false
        }
    }
}

/// `host[:port]` of `url`.
fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netloc() {
        let url = Url::parse("https://example.com/a.zip").unwrap();
        assert_eq!(netloc(&url), "example.com");
        let url = Url::parse("http://127.0.0.1:8080/a.zip").unwrap();
        assert_eq!(netloc(&url), "127.0.0.1:8080");
    }

    #[test]
    fn test_policy_decides_before_asking() {
        let path = Path::new("file.bin");
        assert!(may_overwrite(ExistingFilePolicy::Overwrite, path, |_| {
            panic!("must not ask")
        }));
        assert!(!may_overwrite(ExistingFilePolicy::Skip, path, |_| {
            panic!("must not ask")
        }));
        assert!(may_overwrite(ExistingFilePolicy::Ask, path, |_| true));
        assert!(!may_overwrite(ExistingFilePolicy::Ask, path, |_| false));
    }
}
