//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements [`ProgressCallback`]
//! to show a spinner with the running file count and the current file name
//! while the tree is scanned. Progress output is purely observational and
//! goes to stderr, so it never interleaves with the listing on stdout.
//!
//! # Accessible Mode
//!
//! When accessible mode is enabled the spinner animation is dropped and the
//! line is redrawn less often.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress callback for pipeline phases.
///
/// Implement this trait to receive progress updates during the scan.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "scanning")
    /// * `total` - Total number of items to process, 0 if unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Name of the item being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when an item has been processed, providing its size.
    fn on_item_completed(&self, _bytes: u64) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Terminal progress reporter.
///
/// Only installed when progress is enabled; a run with `--quiet` or
/// `--no-progress` has no progress callback at all.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    accessible: bool,
}

impl Progress {
    /// Create a progress reporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupsweep::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(accessible: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            accessible,
        }
    }

    fn scanning_style(&self) -> ProgressStyle {
        if self.accessible {
            ProgressStyle::with_template("Scanning: {pos} files processed... current: {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        } else {
            ProgressStyle::with_template(
                "{spinner:.green} Scanning [{elapsed_precise}] {pos} files processed... current: {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, _total: usize) {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(self.scanning_style());
        pb.set_prefix(phase.to_string());
        let tick_rate = if self.accessible { 500 } else { 100 };
        pb.enable_steady_tick(Duration::from_millis(tick_rate));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                pb.set_position(current as u64);
                pb.set_message(truncate_name(path, 40));
            }
        }
    }

    fn on_phase_end(&self, _phase: &str) {
        if let Some(pb) = self.bar.lock().ok().and_then(|mut bar| bar.take()) {
            let count = pb.position();
            pb.finish_and_clear();
            log::debug!("Scan progress finished after {} files", count);
        }
    }
}

/// Truncate a file name for display, keeping its tail.
fn truncate_name(name: &str, max_chars: usize) -> String {
    let count = name.chars().count();
    if count <= max_chars {
        return name.to_string();
    }

    let tail: String = name.chars().skip(count - max_chars + 3).collect();
    format!("...{}", tail)
}
