//! Progress feedback while the mapping tables load.
//!
//! Loading is short but not instant, especially over HTTP, so interactive
//! runs get a spinner on stderr. The spinner stays out of the way of real
//! output: commands finish (and clear) it before printing results, and it is
//! suppressed entirely for automation.
//!
//! Suppression applies when any of these hold:
//! - the `--no-progress` flag was passed
//! - the `RPCFINDER_NO_PROGRESS` environment variable is set to any value
//! - stderr is not a terminal (indicatif's own detection)

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::time::Duration;

/// Environment variable disabling all progress output.
pub const NO_PROGRESS_ENV: &str = "RPCFINDER_NO_PROGRESS";

/// Checks the environment kill switch for progress output.
fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// Spinner shown during indeterminate work.
///
/// A suppressed spinner is a hidden bar that silently ignores every
/// operation, so call sites never need to branch.
#[derive(Clone)]
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    /// Start a spinner with an initial message.
    ///
    /// `no_progress` carries the CLI flag; the environment variable is
    /// consulted here as well.
    pub fn new(message: impl Into<String>, no_progress: bool) -> Self {
        let bar = if no_progress || is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(message.into());
        Self {
            inner: bar,
        }
    }

    /// Update the message next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stop the spinner and erase its line. Call before printing results.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Stop the spinner, replacing it with a final line.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
