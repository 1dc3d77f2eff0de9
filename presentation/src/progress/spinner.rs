//! Spinner shown while waiting for a complete reply

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Waiting indicator for non-streaming replies
pub struct ResponseSpinner {
    bar: ProgressBar,
}

impl ResponseSpinner {
    /// Start the spinner immediately
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message("Waiting for reply...");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
