mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::RuleProgress;
pub use text::{ColorMode, TextFormatter};

use crate::engine::Verdict;
use crate::error::Result;

/// Renders a verdict as a report.
pub trait OutputFormatter {
    /// Format the verdict into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, verdict: &Verdict) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn formatter(self, color: ColorMode) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
