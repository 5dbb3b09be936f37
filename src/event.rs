//! Values exchanged between the transfer engine and its callers.
//!
//! The engine reports what it is doing through a finite sequence of
//! [`ProgressEvent`]s, ending with exactly one terminal event, and returns an
//! [`Outcome`] once it is done.

use crate::error::Error;

use std::path::PathBuf;
use std::time::Duration;

/// An event emitted by [`crate::engine::Downloader::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The server accepted the request for the current attempt.
    Started {
        url: String,
        resolved_host: String,
        /// Expected size in bytes, 0 when the server did not send a length.
        total_size: u64,
        content_type: Option<String>,
        /// Status line of the response, e.g. `200 OK`.
        status: String,
    },
    /// A chunk was written to disk.
    Progress {
        bytes_downloaded: u64,
        total_size: u64,
        /// Average bytes per second since the attempt started.
        speed: f64,
        /// Estimated seconds remaining, 0 when unknown.
        eta: f64,
    },
    /// An attempt failed with a transport error.
    AttemptFailed {
        attempt: u32,
        max_attempts: u32,
        error: String,
        will_retry: bool,
    },
    /// Terminal: the file is complete.
    Completed {
        elapsed: Duration,
        final_path: PathBuf,
    },
    /// Terminal: the download was refused or interrupted.
    Canceled { partial_file_deleted: bool },
}

impl ProgressEvent {
    /// Whether no further event follows this one.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Completed { .. } | ProgressEvent::Canceled { .. }
        )
    }
}

/// Final result of one [`crate::engine::Downloader::execute`] call.
#[derive(Debug)]
pub enum Outcome {
    /// The file at `path` is complete and valid.
    Completed {
        path: PathBuf,
        bytes: u64,
        elapsed: Duration,
    },
    /// The user refused to overwrite, or interrupted the transfer.
    Canceled,
    /// The download failed; no partial file is left behind.
    Failed(Error),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Outcome::Canceled)
    }

    /// The error behind a failed outcome.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}
