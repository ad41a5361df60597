use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress spinner around a single network call.
///
/// The spinner only draws; it is finished explicitly with [`Spinner::success`]
/// or [`Spinner::fail`], and cleared on drop if neither was called.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    pub fn success(self, message: impl AsRef<str>) {
        self.bar
            .finish_with_message(format!("{} {}", "✓".green().bold(), message.as_ref()));
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.bar
            .abandon_with_message(format!("{} {}", "✗".red().bold(), message.as_ref()));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
