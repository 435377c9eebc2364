use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::classifier::LineClassifier;
use crate::cli::{CheckArgs, Cli};
use crate::config::Config;
use crate::engine::RuleEngine;
use crate::output::{ColorMode, RuleProgress};
use crate::rule::builtin::compile_rules;
use crate::scanner::CorpusLoader;
use crate::{EXIT_CONFIG_ERROR, Result};

use super::load_config;

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::debug!(error_type = e.error_type(), "check aborted");
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Load config and corpus, run the rules and write the report.
///
/// Returns the verdict's exit code.
///
/// # Errors
/// Returns an error for configuration problems, an unreadable scan root, or a
/// report that cannot be written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Configuration, with CLI overrides
    let mut config = load_config(&args.root, args.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config, args);

    // 2. Rules, compiled before any file is read
    let rules = compile_rules(&config.rules)?;
    let mut engine = RuleEngine::new(rules, LineClassifier::from_config(&config.classifier))
        .with_options(&config.engine);
    engine.select(&args.rules)?;

    // 3. Corpus
    let corpus = CorpusLoader::new(&config.scanner)?.load(&args.root)?;

    // 4. Run
    let total = u64::try_from(engine.rules().len()).unwrap_or(u64::MAX);
    let mut engine = engine.with_progress(RuleProgress::new(total, cli.quiet));
    let verdict = engine.run(Arc::new(corpus))?;

    // 5. Report
    let color = if args.output.is_some() {
        ColorMode::Never
    } else {
        ColorMode::from(cli.color)
    };
    let report = args.format.formatter(color).format(&verdict)?;
    write_output(args.output.as_deref(), &report)?;

    let summary = verdict.summary();
    tracing::info!(
        passed = summary.passed,
        failed = summary.failed,
        crashed = summary.crashed,
        "Check finished"
    );
    Ok(verdict.exit_code())
}

pub(crate) const fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if args.parallel {
        config.engine.parallel = true;
    }
    if let Some(ms) = args.timeout_ms {
        config.engine.timeout_ms = Some(ms);
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
