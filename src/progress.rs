//! Progress bar for download runs.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Builds the run's progress bar, or `None` when it should not be shown.
///
/// The bar is only drawn when enabled and stderr is an interactive terminal.
pub(crate) fn build_progress_bar(total: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || !io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} paintings")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    Some(bar)
}
