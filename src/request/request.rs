//! Request resolution.
//!
//! This module turns raw user input (URL, destination directory and optional
//! tuning values) into a validated [`DownloadRequest`]. Resolution is the only
//! step allowed to touch the filesystem before the engine runs: it creates the
//! destination directory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ictfd::request::resolve;
//!
//! # fn example() -> ictfd::Result<()> {
//! let request = resolve("https://example.com/file.zip", "downloads", None, None, None)?;
//! assert_eq!(request.filename(), "file.zip");
//! assert_eq!(request.chunk_size(), 8192);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::convert::TryFrom;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default number of bytes read from the network and written per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;
/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default maximum number of attempts.
pub const DEFAULT_RETRIES: u32 = 3;

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingFilePolicy {
    /// Ask the caller through the confirmation callback.
    #[default]
    Ask,
    /// Replace the file without asking.
    Overwrite,
    /// Leave the file alone and cancel the download.
    Skip,
}

/// A fully resolved download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: Url,
    directory: PathBuf,
    filename: String,
    chunk_size: usize,
    timeout: Duration,
    retries: u32,
    policy: ExistingFilePolicy,
}

/// Validates the raw inputs and builds a [`DownloadRequest`].
///
/// Missing tuning values fall back to [`DEFAULT_CHUNK_SIZE`],
/// [`DEFAULT_TIMEOUT`] and [`DEFAULT_RETRIES`]. The destination directory and
/// its ancestors are created when missing.
pub fn resolve(
    raw_url: &str,
    raw_dest_dir: impl AsRef<Path>,
    chunk_size: Option<usize>,
    timeout: Option<Duration>,
    retries: Option<u32>,
) -> Result<DownloadRequest> {
    let url = parse_url(raw_url)?;
    let filename = filename_from_url(&url)?;

    let chunk_size = chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        return Err(Error::InvalidArgument(
            "chunk size must be greater than zero".into(),
        ));
    }
    let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
    if timeout.is_zero() {
        return Err(Error::InvalidArgument(
            "timeout must be greater than zero".into(),
        ));
    }
    let retries = retries.unwrap_or(DEFAULT_RETRIES);
    if retries == 0 {
        return Err(Error::InvalidArgument(
            "retries must be at least 1".into(),
        ));
    }

    let directory = raw_dest_dir.as_ref().to_path_buf();
    debug!("Creating destination directory {:?}", directory);
    fs::create_dir_all(&directory)?;

    Ok(DownloadRequest {
        url,
        directory,
        filename,
        chunk_size,
        timeout,
        retries,
        policy: ExistingFilePolicy::default(),
    })
}

/// Parses `raw` and checks that it is an `http` or `https` URL.
pub fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidScheme(other.to_string())),
    }
}

/// Extracts the percent-decoded last path segment of `url`.
pub fn filename_from_url(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .ok_or_else(|| {
            Error::InvalidUrl(format!("The url \"{}\" does not contain a valid path", url))
        })?
        .next_back()
        .unwrap_or_default();

    let filename = match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    };

    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" does not contain a filename",
            url
        )));
    }
    if filename.contains(['/', '\\']) {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" names a file outside the download directory",
            url
        )));
    }
    Ok(filename)
}

impl DownloadRequest {
    /// Replaces the file name derived from the URL.
    pub fn with_filename(self, filename: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return Err(Error::InvalidArgument(format!(
                "\"{}\" is not a valid file name",
                filename
            )));
        }
        Ok(Self { filename, ..self })
    }

    /// Sets what happens when the target file already exists.
    pub fn with_policy(self, policy: ExistingFilePolicy) -> Self {
        Self { policy, ..self }
    }

    /// URL of the resource.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Directory the file is saved into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name used on disk.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Full destination path.
    pub fn final_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maximum number of attempts, at least 1.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn policy(&self) -> ExistingFilePolicy {
        self.policy
    }
}

impl TryFrom<&str> for DownloadRequest {
    type Error = Error;

    /// Resolves `value` into the current directory with default settings.
    fn try_from(value: &str) -> Result<Self> {
        resolve(value, ".", None, None, None)
    }
}
