use std::io::Write;

use crate::engine::{RuleOutcome, RuleReport, Verdict, VerdictSummary};
use crate::error::Result;
use crate::rule::{Severity, Violation};

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Fail => ansi::RED,
            Severity::Warn => ansi::YELLOW,
            Severity::Info => ansi::CYAN,
        }
    }

    fn format_violation(&self, violation: &Violation, output: &mut Vec<u8>) {
        let tag = match &violation.check {
            Some(check) => format!("{}/{check}", violation.rule_id),
            None => violation.rule_id.clone(),
        };
        let severity = self.paint(
            violation.severity.as_str(),
            Self::severity_color(violation.severity),
        );
        writeln!(
            output,
            "  {} [{tag}] {severity}: {}",
            violation.location(),
            violation.message
        )
        .ok();

        if let Some(snippet) = &violation.snippet {
            writeln!(output, "      {}", self.paint(snippet, ansi::DIM)).ok();
        }
        if let Some(fix) = &violation.fix {
            writeln!(output, "    fix: {fix}").ok();
        }
    }

    fn format_report(&self, report: &RuleReport, output: &mut Vec<u8>) {
        let status = match &report.outcome {
            RuleOutcome::Passed { .. } => self.paint("PASS", ansi::GREEN),
            RuleOutcome::Failed { .. } => self.paint("FAIL", ansi::RED),
            RuleOutcome::Crashed { .. } => self.paint("CRASH", ansi::MAGENTA),
        };
        writeln!(output, "{status} {} {}", report.rule_id, report.name).ok();

        match &report.outcome {
            RuleOutcome::Crashed { error } => {
                writeln!(output, "  error: {error}").ok();
            }
            outcome => {
                for violation in outcome.violations() {
                    self.format_violation(violation, output);
                }
            }
        }
    }

    fn format_summary(&self, summary: &VerdictSummary) -> String {
        let passed = self.paint(&summary.passed.to_string(), ansi::GREEN);
        let failed = self.paint(&summary.failed.to_string(), ansi::RED);
        let crashed = self.paint(&summary.crashed.to_string(), ansi::MAGENTA);
        format!(
            "Summary: {} rules, {passed} passed, {failed} failed, {crashed} crashed",
            summary.rules
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, verdict: &Verdict) -> Result<String> {
        let mut output = Vec::new();

        if !verdict.load_warnings().is_empty() {
            writeln!(output, "{}", self.paint("Load warnings", ansi::YELLOW)).ok();
            for warning in verdict.load_warnings() {
                self.format_violation(warning, &mut output);
            }
            writeln!(output).ok();
        }

        for report in verdict.reports() {
            self.format_report(report, &mut output);
        }
        if !verdict.reports().is_empty() {
            writeln!(output).ok();
        }

        writeln!(output, "{}", self.format_summary(&verdict.summary())).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
