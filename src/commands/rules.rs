use std::fmt::Write;

use crate::cli::{Cli, RulesArgs};
use crate::config::RuleSpec;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::load_config;

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(listing) => {
            print!("{listing}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Load and validate the configuration, then list its rules.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or a rule does not compile.
pub fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> Result<String> {
    let config = load_config(&args.root, args.config.as_deref(), cli.no_config)?;
    Ok(format_rule_list(&config.rules))
}

/// One line per rule: id, kind, severity and name, with the description
/// indented underneath when present.
#[must_use]
pub fn format_rule_list(rules: &[RuleSpec]) -> String {
    if rules.is_empty() {
        return "No rules configured.\n".to_string();
    }

    let id_width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let kind_width = rules.iter().map(|r| r.kind.name().len()).max().unwrap_or(0);

    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<kind_width$}  {:<4}  {}",
            rule.id,
            rule.kind.name(),
            rule.severity.as_str(),
            rule.name
        );
        if let Some(description) = &rule.description {
            let _ = writeln!(out, "{:<id_width$}  {description}", "");
        }
    }
    let _ = writeln!(out, "\n{} rules", rules.len());
    out
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
