//! Progress module containing the reporter and its terminal output.
//!
//! # Overview
//!
//! - `format` - Byte size and duration formatting
//! - `reporter` - Translation of engine events into display lines
//! - `style` - Styling options for the live progress line
//! - `display` - indicatif-backed terminal sink
//!
//! # Examples
//!
//! ```rust
//! use ictfd::progress::{ProgressBarOpts, ProgressDisplay, Reporter};
//!
//! let mut reporter = Reporter::new();
//! let mut display = ProgressDisplay::new(ProgressBarOpts::default());
//!
//! // Typically passed as the `on_event` callback of `Downloader::execute`.
//! let mut on_event = move |event| {
//!     if let Some(rendered) = reporter.render(&event) {
//!         display.apply(rendered);
//!     }
//! };
//! # let _ = &mut on_event;
//! ```

pub(crate) mod display;
pub(crate) mod format;
pub(crate) mod reporter;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use format::{format_bytes, format_speed, format_time};
pub use reporter::{progress_line, render_failure, render_request, Rendered, Reporter};
pub use style::ProgressBarOpts;
