//! Configuration semantic validation.
//!
//! Runs after parsing: identifier uniqueness, cross-field references, and
//! compilation of every glob and regex so bad patterns surface before any
//! file is scanned.

use indexmap::IndexSet;

use crate::config::{Config, RuleKind, RuleSpec};
use crate::rule::builtin::compile_rule;
use crate::{FitnessGuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if rule ids are empty or duplicated, a `function-body` order
/// references an unknown requirement, or any glob/regex fails to compile.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_scanner_section(config)?;
    validate_rule_ids(&config.rules)?;
    for spec in &config.rules {
        validate_rule_kind(spec)?;
        compile_rule(spec)?;
    }
    Ok(())
}

fn validate_scanner_section(config: &Config) -> Result<()> {
    for (i, root) in config.scanner.roots.iter().enumerate() {
        if root.extensions.is_empty() {
            return Err(FitnessGuardError::Config(format!(
                "scanner.roots[{i}] ({}) must list at least one extension",
                root.dir
            )));
        }
    }
    for pattern in &config.scanner.exclude {
        globset::Glob::new(pattern).map_err(|e| FitnessGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

fn validate_rule_ids(rules: &[RuleSpec]) -> Result<()> {
    let mut seen = IndexSet::new();
    for (i, spec) in rules.iter().enumerate() {
        if spec.id.trim().is_empty() {
            return Err(FitnessGuardError::Config(format!(
                "rules[{i}].id must not be empty"
            )));
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(FitnessGuardError::Config(format!(
                "duplicate rule id '{}'",
                spec.id
            )));
        }
    }
    Ok(())
}

fn validate_rule_kind(spec: &RuleSpec) -> Result<()> {
    match &spec.kind {
        RuleKind::Forbidden { patterns } if patterns.is_empty() => Err(FitnessGuardError::Config(
            format!("rule {}: forbidden rule needs at least one pattern", spec.id),
        )),
        RuleKind::PairedCalls { pairs } if pairs.is_empty() => Err(FitnessGuardError::Config(
            format!("rule {}: paired-calls rule needs at least one pair", spec.id),
        )),
        RuleKind::FunctionBody {
            requires, order, ..
        } => {
            for [first, second] in order {
                for name in [first, second] {
                    if !requires.iter().any(|r| &r.name == name) {
                        return Err(FitnessGuardError::Config(format!(
                            "rule {}: order references unknown requirement '{name}'",
                            spec.id
                        )));
                    }
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
