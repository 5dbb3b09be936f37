//! Terminal sink for rendered events.
//!
//! [`ProgressDisplay`] draws [`Rendered::InPlace`] lines on an indicatif
//! spinner, which rate-limits redraws, and prints [`Rendered::Block`] lines on
//! stdout while the spinner is suspended.
//!
//! # Examples
//!
//! ```rust
//! use ictfd::progress::{ProgressBarOpts, ProgressDisplay, Reporter};
//! use ictfd::ProgressEvent;
//!
//! let mut reporter = Reporter::new();
//! let mut display = ProgressDisplay::new(ProgressBarOpts::hidden());
//!
//! let event = ProgressEvent::Canceled { partial_file_deleted: false };
//! if let Some(rendered) = reporter.render(&event) {
//!     display.apply(rendered);
//! }
//! display.finish();
//! ```

use super::reporter::Rendered;
use super::style::ProgressBarOpts;

use indicatif::ProgressBar;

/// Progress display manager for a single download.
pub struct ProgressDisplay {
    /// Style options for the live line.
    opts: ProgressBarOpts,
    /// The live line, created on the first in-place update.
    current: Option<ProgressBar>,
}

impl ProgressDisplay {
    pub fn new(opts: ProgressBarOpts) -> Self {
        Self {
            opts,
            current: None,
        }
    }

    /// Whether a live line is currently on screen.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Draws one rendered event.
    pub fn apply(&mut self, rendered: Rendered) {
        match rendered {
            Rendered::InPlace(line) => {
                let opts = &self.opts;
                let bar = self
                    .current
                    .get_or_insert_with(|| opts.clone().to_progress_bar());
                bar.set_message(line);
                bar.tick();
            }
            Rendered::Block {
                lines,
                after_progress,
            } => {
                if after_progress {
                    self.finish_current();
                }
                self.print_lines(&lines);
            }
        }
    }

    /// Prints lines without corrupting the live line.
    pub fn print_lines(&self, lines: &[String]) {
        let print = || {
            for line in lines {
                println!("{}", line);
            }
        };
        match &self.current {
            Some(bar) => bar.suspend(print),
            None => print(),
        }
    }

    /// Finish the display, clearing or keeping the live line based on configuration.
    pub fn finish(mut self) {
        self.finish_current();
    }

    fn finish_current(&mut self) {
        if let Some(bar) = self.current.take() {
            if self.opts.clear {
                bar.finish_and_clear();
            } else {
                bar.finish();
            }
        }
    }
}
