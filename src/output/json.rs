use serde::Serialize;

use crate::engine::{RuleOutcome, RuleReport, Verdict, VerdictSummary};
use crate::error::Result;
use crate::rule::Violation;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    passed: bool,
    summary: VerdictSummary,
    load_warnings: &'a [Violation],
    rules: Vec<JsonRule<'a>>,
}

#[derive(Serialize)]
struct JsonRule<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a [Violation]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, verdict: &Verdict) -> Result<String> {
        let output = JsonOutput {
            passed: verdict.passed(),
            summary: verdict.summary(),
            load_warnings: verdict.load_warnings(),
            rules: verdict.reports().iter().map(convert_report).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_report(report: &RuleReport) -> JsonRule<'_> {
    let (violations, error) = match &report.outcome {
        RuleOutcome::Crashed { error } => (None, Some(error.as_str())),
        outcome => (Some(outcome.violations()), None),
    };
    JsonRule {
        id: &report.rule_id,
        name: &report.name,
        description: report.description.as_deref(),
        status: report.outcome.status(),
        violations,
        error,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
