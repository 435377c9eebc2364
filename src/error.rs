use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitnessGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regex '{pattern}'")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule {rule_id} failed: {message}")]
    Rule { rule_id: String, message: String },

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl FitnessGuardError {
    /// Short category name, used in log fields and error summaries.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_)
            | Self::InvalidPattern { .. }
            | Self::InvalidRegex { .. }
            | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::Rule { .. } => "Rule",
            Self::Engine(_) => "Engine",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "Serialize",
        }
    }

    /// Build a rule defect error. Rules return this when their own logic hits
    /// input they cannot handle; the engine records it as a crash.
    pub fn rule(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Wrap a regex compile error with the pattern that caused it.
    #[must_use]
    pub fn invalid_regex(pattern: &str, source: regex::Error) -> Self {
        Self::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FitnessGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
