use std::fmt;

use serde::{Deserialize, Serialize};

/// How much a violation matters. Only `Fail` affects the exit status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Fail,
    Warn,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule id attached to problems found while loading the corpus.
pub const CORPUS_RULE_ID: &str = "corpus";

/// A single finding. Immutable once built; the `with_*` methods consume and
/// return the value while it is being assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Root-relative path with forward slashes, or the rule scope for
    /// corpus-level findings.
    pub path: String,
    /// 1-indexed line; absent for file- or corpus-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub severity: Severity,
    pub rule_id: String,
    /// Name of the sub-check that produced this violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// Trimmed offending source line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Violation {
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line: None,
            severity,
            rule_id: rule_id.into(),
            check: None,
            message: message.into(),
            fix: None,
            snippet: None,
        }
    }

    /// A load problem reported against the corpus.
    #[must_use]
    pub fn load_warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CORPUS_RULE_ID, Severity::Warn, path, message)
    }

    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Option<&str>) -> Self {
        self.fix = fix.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        let trimmed = snippet.trim();
        if !trimmed.is_empty() {
            self.snippet = Some(trimmed.to_string());
        }
        self
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        self.severity.is_fail()
    }

    /// `path:line`, or just the path when there is no line.
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Sort by file, line, rule id, check name and message so output does not
/// depend on execution order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.rule_id.cmp(&b.rule_id))
            .then_with(|| a.check.cmp(&b.check))
            .then_with(|| a.message.cmp(&b.message))
    });
}

#[cfg(test)]
#[path = "violation_tests.rs"]
mod tests;
