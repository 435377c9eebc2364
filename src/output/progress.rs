use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} Checking [{bar:40.cyan/blue}] {pos}/{len} rules {msg}";

/// Progress bar for rule execution.
///
/// Hidden in quiet mode or when stderr is not a TTY. Drawn on stderr so it
/// never mixes with the report on stdout.
#[derive(Clone)]
pub struct RuleProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl std::fmt::Debug for RuleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleProgress")
            .field("done", &self.position())
            .finish_non_exhaustive()
    }
}

impl RuleProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    /// A bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new_with_visibility(0, true, false)
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar(total)
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_visible_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Mark one rule as finished. Safe to call from rayon workers.
    pub fn rule_done(&self, rule_id: &str) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_message(rule_id.to_string());
        self.progress_bar.set_position(count);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
