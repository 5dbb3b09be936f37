//! Rendering of engine events into terminal lines.
//!
//! [`Reporter`] is a pure translation from [`ProgressEvent`] to text. The only
//! thing it remembers is the last in-place progress line, so it can drop an
//! identical re-render and tell the sink when a block of regular lines follows
//! a progress line that must be kept on screen.

use super::format::{format_bytes, format_speed, format_time};
use crate::engine::percentage;
use crate::error::Error;
use crate::event::ProgressEvent;
use crate::request::DownloadRequest;

/// Output of [`Reporter::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Replace the current terminal line.
    InPlace(String),
    /// Print these lines. `after_progress` is set when the previous output
    /// was an in-place line that has to be committed first.
    Block {
        lines: Vec<String>,
        after_progress: bool,
    },
}

/// Turns events into display lines.
#[derive(Debug, Default)]
pub struct Reporter {
    last_in_place: Option<String>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `event`, or returns `None` when nothing visible changed.
    pub fn render(&mut self, event: &ProgressEvent) -> Option<Rendered> {
        let lines = match event {
            ProgressEvent::Progress {
                bytes_downloaded,
                total_size,
                speed,
                eta,
            } => {
                let line = progress_line(*bytes_downloaded, *total_size, *speed, *eta);
                if self.last_in_place.as_deref() == Some(line.as_str()) {
                    return None;
                }
                self.last_in_place = Some(line.clone());
                return Some(Rendered::InPlace(line));
            }
            ProgressEvent::Started {
                url,
                resolved_host,
                total_size,
                content_type,
                status,
            } => {
                let kind = content_type
                    .as_ref()
                    .map(|ct| format!(" [{}]", ct))
                    .unwrap_or_default();
                let length = if *total_size > 0 {
                    format!("Length: {} ({}){}", total_size, format_bytes(*total_size), kind)
                } else {
                    format!("Length: unspecified{}", kind)
                };
                vec![
                    url.clone(),
                    format!("Resolving {0} ({0})... connected.", resolved_host),
                    format!("HTTP request sent, awaiting response... {}", status),
                    length,
                ]
            }
            ProgressEvent::AttemptFailed {
                attempt,
                max_attempts,
                error,
                will_retry,
            } => {
                let next = if *will_retry {
                    "Retrying..."
                } else {
                    "Giving up."
                };
                vec![
                    format!("Error downloading file: {}", error),
                    format!("Attempt {}/{} failed. {}", attempt, max_attempts, next),
                ]
            }
            ProgressEvent::Completed { elapsed, .. } => vec![
                "File downloaded successfully.".to_string(),
                format!("Total Time: {}", format_time(elapsed.as_secs())),
            ],
            ProgressEvent::Canceled {
                partial_file_deleted: true,
            } => vec![
                "Download canceled. Deleting incomplete file...".to_string(),
                "Incomplete file deleted.".to_string(),
            ],
            ProgressEvent::Canceled {
                partial_file_deleted: false,
            } => vec!["Download canceled.".to_string()],
        };

        Some(Rendered::Block {
            lines,
            after_progress: self.last_in_place.take().is_some(),
        })
    }
}

/// The live progress line.
pub fn progress_line(bytes_downloaded: u64, total_size: u64, speed: f64, eta: f64) -> String {
    match percentage(bytes_downloaded, total_size) {
        Some(percent) => format!(
            "Download Speed: {} | Progress: {:.2}% | Estimated Time: {:.0} seconds",
            format_speed(speed),
            percent,
            eta
        ),
        None => format!(
            "Download Speed: {} | Downloaded: {}",
            format_speed(speed),
            format_bytes(bytes_downloaded)
        ),
    }
}

/// Lines printed before a download starts.
pub fn render_request(request: &DownloadRequest) -> Vec<String> {
    vec![
        format!("Saving to: '{}'", request.final_path().display()),
        format!("Using chunk size: {} bytes", request.chunk_size()),
        format!("Timeout: {} seconds", request.timeout().as_secs_f64()),
        format!("Max attempts: {}", request.retries()),
        "Press Ctrl+C to cancel the download.".to_string(),
    ]
}

/// Lines explaining a failed download, with a hint for common causes.
pub fn render_failure(error: &Error) -> Vec<String> {
    let mut lines = vec![format!("Error downloading file: {}", error)];
    if error.is_timeout() {
        lines.push(
            "The download timed out. Please check your internet connection or try again later."
                .to_string(),
        );
    } else if error.is_connect() {
        lines.push("Connection error occurred. Please check your network.".to_string());
    }
    lines
}
