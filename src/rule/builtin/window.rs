use crate::config::RuleSpec;
use crate::error::Result;
use crate::rule::{Locator, Neighborhood, PatternRule};

use super::compile_regex;

/// Lines matching `anchor` must have a line matching `required` within
/// `before` lines above or `after` lines below, optionally only inside one
/// function.
pub(super) fn compile(
    spec: &RuleSpec,
    function: Option<String>,
    anchor: &str,
    required: &str,
    (before, after): (usize, usize),
    message: Option<&str>,
) -> Result<PatternRule> {
    let default_message = format!("'{{match}}' without '{required}' within {before} lines before or {after} after");
    PatternRule::builder(&spec.id, &spec.name)
        .description(spec.description.clone())
        .files(spec.files.clone())
        .severity(spec.severity)
        .on_missing(spec.on_missing)
        .fix(spec.fix.clone())
        .locate(Locator::Lines(compile_regex(anchor)?))
        .within(function)
        .neighborhood(Neighborhood::Window { before, after })
        .require_nearby(compile_regex(required)?)
        .message(message.map_or(default_message, str::to_string))
        .check("window")
        .build()
}
