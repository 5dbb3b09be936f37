//! ictfd is an interactive command-line file downloader: it fetches a URL over
//! HTTP(S), streams it to disk, reports live progress and retries transient
//! failures.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ictfd::{engine::{CancelToken, DownloaderBuilder}, request::resolve, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let reqwest_rs = "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip";
//! let request = resolve(reqwest_rs, "output", None, None, None)?;
//! let downloader = DownloaderBuilder::new().build()?;
//! downloader
//!     .execute(&request, |_| true, |event| println!("{:?}", event), &CancelToken::new())
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`request`] - Request resolution and the `DownloadRequest` value
//! - [`engine`] - The retrying, streaming, cancellable transfer engine
//! - [`event`] - Progress events and download outcomes
//! - [`progress`] - Rendering of events for a terminal
//! - [`http`] - The transport seam and its reqwest implementation
//! - [`settings`] - The key=value configuration file
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Shared utility functions

pub mod engine;
pub mod error;
pub mod event;
pub mod http;
pub mod progress;
pub mod request;
pub mod settings;
pub mod utils;

pub use engine::{CancelToken, Downloader, DownloaderBuilder};
pub use error::{Error, ErrorKind, Result};
pub use event::{Outcome, ProgressEvent};
pub use http::{create_http_client, HttpClientConfig, HttpTransport, TransferResponse, Transport};
pub use progress::{format_bytes, format_time, ProgressBarOpts, Reporter};
pub use request::{resolve, DownloadRequest, ExistingFilePolicy};
pub use settings::Settings;
