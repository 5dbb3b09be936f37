//! Error handling for ictfd.
//!
//! This module provides the [`Error`] enum shared by the resolver, the transfer
//! engine and the settings loader, plus the coarse [`ErrorKind`] taxonomy used
//! to decide what is retried and which exit status the CLI reports.

use std::io;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can happen when using ictfd.
#[derive(Error, Debug)]
pub enum Error {
    /// The URL could not be parsed, or it does not name a file.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL uses a scheme other than `http` or `https`.
    #[error("Unsupported scheme: {0}. Cannot download the file.")]
    InvalidScheme(String),

    /// A request parameter is out of range (zero chunk size, zero timeout...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O Error.
    ///
    /// Disk errors are fatal: they are never retried.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the HTTP client.
    #[error("HTTP client error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Connecting or reading took longer than the per-attempt timeout.
    #[error("timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The server answered with a non-success status.
    #[error("server responded with {0}")]
    HttpStatus(StatusCode),

    /// Any other transport failure reported by a [`crate::http::Transport`].
    #[error("connection error: {0}")]
    Connection(String),

    /// Every configured attempt failed with a transport error.
    #[error("giving up after {attempts} attempt(s): {last}")]
    MaxRetriesExceeded { attempts: u32, last: Box<Error> },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    InvalidScheme,
    InvalidArgument,
    Config,
    /// Connection, timeout or HTTP status failure. Retriable.
    Transport,
    /// Local disk failure. Fatal.
    Io,
    MaxRetriesExceeded,
}

impl Error {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::InvalidScheme(_) => ErrorKind::InvalidScheme,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Config(_) => ErrorKind::Config,
            Error::IOError { .. } => ErrorKind::Io,
            Error::Reqwest { .. }
            | Error::Middleware { .. }
            | Error::Timeout(_)
            | Error::HttpStatus(_)
            | Error::Connection(_) => ErrorKind::Transport,
            Error::MaxRetriesExceeded { .. } => ErrorKind::MaxRetriesExceeded,
        }
    }

    /// Whether the transfer engine may start another attempt after this error.
    pub fn is_retriable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Whether this error (or the last error behind a retry exhaustion) is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout(_) => true,
            Error::Reqwest { source } => source.is_timeout(),
            Error::Middleware { source } => matches!(
                source,
                reqwest_middleware::Error::Reqwest(e) if e.is_timeout()
            ),
            Error::MaxRetriesExceeded { last, .. } => last.is_timeout(),
            _ => false,
        }
    }

    /// Whether this error (or the last error behind a retry exhaustion) is a
    /// failure to reach the server.
    pub fn is_connect(&self) -> bool {
        match self {
            Error::Connection(_) => true,
            Error::Reqwest { source } => source.is_connect(),
            Error::Middleware { source } => matches!(
                source,
                reqwest_middleware::Error::Reqwest(e) if e.is_connect()
            ),
            Error::MaxRetriesExceeded { last, .. } => last.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for operations that can fail with an ictfd error.
pub type Result<T> = std::result::Result<T, Error>;
