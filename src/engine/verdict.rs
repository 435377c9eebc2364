use serde::Serialize;

use crate::rule::Violation;
use crate::{EXIT_RULES_FAILED, EXIT_SUCCESS};

/// Result of running one rule.
///
/// A rule whose findings are all `warn`/`info` passes; its findings are kept
/// as advisories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleOutcome {
    Passed { advisories: Vec<Violation> },
    Failed { violations: Vec<Violation> },
    Crashed { error: String },
}

impl RuleOutcome {
    /// `Failed` if any violation has `fail` severity, otherwise `Passed`.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.iter().any(Violation::is_fail) {
            Self::Failed { violations }
        } else {
            Self::Passed {
                advisories: violations,
            }
        }
    }

    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    #[must_use]
    pub const fn is_crashed(&self) -> bool {
        matches!(self, Self::Crashed { .. })
    }

    /// Findings of either kind; empty for a crash.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Passed { advisories } => advisories,
            Self::Failed { violations } => violations,
            Self::Crashed { .. } => &[],
        }
    }

    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "passed",
            Self::Failed { .. } => "failed",
            Self::Crashed { .. } => "crashed",
        }
    }
}

/// One rule's entry in the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    pub rule_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

/// Counts derived from a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictSummary {
    pub rules: usize,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
    pub violations: usize,
    pub advisories: usize,
    pub load_warnings: usize,
}

/// Aggregated result of a run, in declared rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    reports: Vec<RuleReport>,
    load_warnings: Vec<Violation>,
}

impl Verdict {
    #[must_use]
    pub const fn new(reports: Vec<RuleReport>, load_warnings: Vec<Violation>) -> Self {
        Self {
            reports,
            load_warnings,
        }
    }

    #[must_use]
    pub fn reports(&self) -> &[RuleReport] {
        &self.reports
    }

    #[must_use]
    pub fn load_warnings(&self) -> &[Violation] {
        &self.load_warnings
    }

    /// True when every rule passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.reports.iter().all(|r| r.outcome.is_passed())
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            EXIT_SUCCESS
        } else {
            EXIT_RULES_FAILED
        }
    }

    #[must_use]
    pub fn summary(&self) -> VerdictSummary {
        let mut summary = VerdictSummary {
            rules: self.reports.len(),
            load_warnings: self.load_warnings.len(),
            ..VerdictSummary::default()
        };
        for report in &self.reports {
            match &report.outcome {
                RuleOutcome::Passed { advisories } => {
                    summary.passed += 1;
                    summary.advisories += advisories.len();
                }
                RuleOutcome::Failed { violations } => {
                    summary.failed += 1;
                    let fails = violations.iter().filter(|v| v.is_fail()).count();
                    summary.violations += fails;
                    summary.advisories += violations.len() - fails;
                }
                RuleOutcome::Crashed { .. } => summary.crashed += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
