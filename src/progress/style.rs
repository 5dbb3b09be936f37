//! Progress line styling options.
//!
//! # Examples
//!
//! ```rust
//! use ictfd::progress::ProgressBarOpts;
//!
//! // A plain line without spinner, cleared once the download ends.
//! let opts = ProgressBarOpts::new(Some(ProgressBarOpts::TEMPLATE_LINE.into()), true, true);
//!
//! // Nothing is drawn.
//! let quiet = ProgressBarOpts::hidden();
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Define the options for the live progress line.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Enable or disable the progress line.
    pub(crate) enabled: bool,
    /// Clear the progress line once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_SPINNER_LINE.into()),
            enabled: true,
            clear: false,
        }
    }
}

impl ProgressBarOpts {
    /// Template showing only the rendered line.
    pub const TEMPLATE_LINE: &'static str = "{msg}";
    /// Template prefixing the rendered line with a spinner.
    ///
    /// `⠙ Download Speed: 1.50 MB/s | Progress: 42.17% | Estimated Time: 12 seconds`
    pub const TEMPLATE_SPINNER_LINE: &'static str = "{spinner:.green} {msg}";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(template: Option<String>, enabled: bool, clear: bool) -> Self {
        Self {
            template,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default spinner style.
    pub fn to_progress_style(self) -> ProgressStyle {
        match self.template {
            Some(template) => ProgressStyle::default_spinner()
                .template(&template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            None => ProgressStyle::default_spinner(),
        }
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self) -> ProgressBar {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new_spinner().with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress line.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
