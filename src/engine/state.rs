//! Per-attempt transfer bookkeeping.
//!
//! [`TransferState`] tracks how far the current attempt got and derives the
//! speed and ETA reported in [`ProgressEvent::Progress`]. Every division is
//! guarded so that a zero elapsed time or an unknown total never produces NaN
//! or infinity.

use crate::event::ProgressEvent;

use std::time::{Duration, Instant};

/// Mutable state owned by a single `execute` call.
#[derive(Debug, Clone)]
pub struct TransferState {
    attempt: u32,
    bytes_downloaded: u64,
    total_size: u64,
    started_at: Instant,
    speed: f64,
    eta: f64,
}

impl TransferState {
    pub fn new() -> Self {
        Self {
            attempt: 0,
            bytes_downloaded: 0,
            total_size: 0,
            started_at: Instant::now(),
            speed: 0.0,
            eta: 0.0,
        }
    }

    /// Starts attempt number `attempt`; nothing from the previous attempt is kept.
    pub fn reset(&mut self, attempt: u32) {
        *self = Self {
            attempt,
            ..Self::new()
        };
    }

    /// Records the expected size announced by the server (0 if unknown).
    pub fn set_total_size(&mut self, total_size: u64) {
        self.total_size = total_size;
    }

    /// Accounts for `len` freshly written bytes, measuring elapsed time from
    /// the start of the attempt.
    pub fn record(&mut self, len: u64) -> ProgressEvent {
        let elapsed = self.elapsed();
        self.record_at(len, elapsed)
    }

    /// Same as [`TransferState::record`] with an explicit elapsed time.
    pub fn record_at(&mut self, len: u64, elapsed: Duration) -> ProgressEvent {
        self.bytes_downloaded += len;
        self.speed = speed(self.bytes_downloaded, elapsed);
        self.eta = eta(self.total_size, self.bytes_downloaded, self.speed);
        ProgressEvent::Progress {
            bytes_downloaded: self.bytes_downloaded,
            total_size: self.total_size,
            speed: self.speed,
            eta: self.eta,
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.bytes_downloaded
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Time since the current attempt started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new()
    }
}

/// Average bytes per second, 0 when no time has elapsed.
pub fn speed(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    finite_or_zero(bytes as f64 / secs)
}

/// Seconds remaining, 0 when the speed or the total is unknown.
pub fn eta(total: u64, downloaded: u64, speed: f64) -> f64 {
    if total == 0 || speed <= 0.0 {
        return 0.0;
    }
    finite_or_zero(total.saturating_sub(downloaded) as f64 / speed)
}

/// Completion percentage clamped to 100, `None` when the total is unknown.
pub fn percentage(downloaded: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(finite_or_zero(downloaded as f64 / total as f64 * 100.0).min(100.0))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
