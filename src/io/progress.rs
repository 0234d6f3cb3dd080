//! Progress reporting for permutation replicates

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static REPLICATE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over a fixed number of permutation replicates
///
/// Constructing with `quiet` yields a no-op reporter so callers never
/// branch on verbosity themselves.
pub struct ReplicateProgress {
    bar: Option<ProgressBar>,
}

impl ReplicateProgress {
    /// Create a reporter for the given replicate count
    pub fn new(replicates: usize, message: &str, quiet: bool) -> Self {
        if quiet {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(replicates as u64);
        bar.set_style(REPLICATE_STYLE.clone());
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Record one completed replicate
    pub fn advance(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
