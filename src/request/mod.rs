//! Request module containing the request resolver.
//!
//! The resolver validates user input and produces the immutable
//! [`DownloadRequest`] consumed by the transfer engine.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ictfd::request::{resolve, ExistingFilePolicy};
//! use std::time::Duration;
//!
//! # fn example() -> ictfd::Result<()> {
//! let request = resolve(
//!     "https://example.com/releases/tool.tar.gz",
//!     "/tmp/downloads",
//!     Some(64 * 1024),
//!     Some(Duration::from_secs(30)),
//!     Some(5),
//! )?
//! .with_policy(ExistingFilePolicy::Overwrite);
//! println!("Saving to {}", request.final_path().display());
//! # Ok(())
//! # }
//! ```

pub mod request;

pub use request::{
    filename_from_url, parse_url, resolve, DownloadRequest, ExistingFilePolicy,
    DEFAULT_CHUNK_SIZE, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
};
