//! Engine module containing the transfer engine, its builder and configuration.
//!
//! # Overview
//!
//! - `downloader` - [`Downloader`] and its retrying, streaming `execute`
//! - `builder` - [`DownloaderBuilder`] for configuring a [`Downloader`]
//! - `config` - Shared configuration and defaults
//! - `state` - Per-attempt bookkeeping, speed and ETA computation
//! - `chunker` - Fixed-size re-chunking of response bodies
//! - `cancel` - [`CancelToken`] for cooperative interruption
//!
//! # Examples
//!
//! ```rust,no_run
//! use ictfd::engine::{CancelToken, DownloaderBuilder};
//! use ictfd::request::{resolve, ExistingFilePolicy};
//!
//! # async fn example() -> ictfd::Result<()> {
//! let request = resolve("https://example.com/file.zip", "downloads", None, None, None)?
//!     .with_policy(ExistingFilePolicy::Overwrite);
//! let downloader = DownloaderBuilder::new().build()?;
//!
//! let cancel = CancelToken::new();
//! let watcher = cancel.clone();
//! tokio::spawn(async move {
//!     if tokio::signal::ctrl_c().await.is_ok() {
//!         watcher.cancel();
//!     }
//! });
//!
//! let outcome = downloader.execute(&request, |_| false, |_| {}, &cancel).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cancel;
pub mod chunker;
pub mod config;
pub mod downloader;
pub mod state;

pub use builder::DownloaderBuilder;
pub use cancel::CancelToken;
pub use config::{DownloaderConfig, DEFAULT_BACKOFF};
pub use downloader::Downloader;
pub use state::{percentage, TransferState};
