//! Runs compiled rules against a loaded corpus and aggregates a verdict.

mod verdict;

pub use verdict::{RuleOutcome, RuleReport, Verdict, VerdictSummary};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::classifier::LineClassifier;
use crate::config::EngineConfig;
use crate::error::{FitnessGuardError, Result};
use crate::output::RuleProgress;
use crate::rule::{Rule, RuleContext, sort_violations};
use crate::scanner::Corpus;

/// Lifecycle of a [`RuleEngine`]. An engine runs exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Done,
}

pub struct RuleEngine {
    rules: Vec<Arc<dyn Rule>>,
    classifier: Arc<LineClassifier>,
    parallel: bool,
    timeout: Option<Duration>,
    progress: RuleProgress,
    state: EngineState,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.rules.iter().map(|r| r.id()).collect();
        f.debug_struct("RuleEngine")
            .field("rules", &ids)
            .field("parallel", &self.parallel)
            .field("timeout", &self.timeout)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RuleEngine {
    #[must_use]
    pub fn new(rules: Vec<Arc<dyn Rule>>, classifier: LineClassifier) -> Self {
        Self {
            rules,
            classifier: Arc::new(classifier),
            parallel: false,
            timeout: None,
            progress: RuleProgress::hidden(),
            state: EngineState::Idle,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: &EngineConfig) -> Self {
        self.parallel = options.parallel;
        self.timeout = options.timeout_ms.map(Duration::from_millis);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: RuleProgress) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Keep only the rules whose ids are listed, in declared order.
    ///
    /// An empty list keeps every rule.
    ///
    /// # Errors
    /// Returns a config error naming the first id that matches no rule.
    pub fn select(&mut self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        if let Some(unknown) = ids
            .iter()
            .find(|id| !self.rules.iter().any(|r| r.id() == id.as_str()))
        {
            return Err(FitnessGuardError::Config(format!(
                "unknown rule id '{unknown}'"
            )));
        }
        self.rules
            .retain(|rule| ids.iter().any(|id| id == rule.id()));
        Ok(())
    }

    /// Run every rule once against `corpus`.
    ///
    /// A rule that errors, panics, or exceeds the timeout is reported as
    /// crashed; the rest still run. Reports follow declared rule order and
    /// violations inside each report are sorted, so the verdict does not
    /// depend on scheduling.
    ///
    /// # Errors
    /// Returns an engine error if this engine has already run.
    pub fn run(&mut self, corpus: Arc<Corpus>) -> Result<Verdict> {
        if self.state != EngineState::Idle {
            return Err(FitnessGuardError::Engine(
                "engine has already run; build a new one".to_string(),
            ));
        }
        self.state = EngineState::Running;
        tracing::info!(
            rules = self.rules.len(),
            files = corpus.len(),
            parallel = self.parallel,
            "Running rules"
        );

        let this = &*self;
        let reports: Vec<RuleReport> = if this.parallel {
            this.rules
                .par_iter()
                .map(|rule| this.run_rule(rule, &corpus))
                .collect()
        } else {
            this.rules
                .iter()
                .map(|rule| this.run_rule(rule, &corpus))
                .collect()
        };
        self.progress.finish();
        self.state = EngineState::Done;

        Ok(Verdict::new(reports, corpus.load_warnings().to_vec()))
    }

    fn run_rule(&self, rule: &Arc<dyn Rule>, corpus: &Arc<Corpus>) -> RuleReport {
        let started = Instant::now();
        let outcome = match self.timeout {
            Some(limit) => execute_with_timeout(
                Arc::clone(rule),
                Arc::clone(corpus),
                Arc::clone(&self.classifier),
                limit,
            ),
            None => execute(rule.as_ref(), corpus, &self.classifier),
        };

        let elapsed_ms = started.elapsed().as_millis();
        match &outcome {
            RuleOutcome::Crashed { error } => {
                tracing::warn!(rule = rule.id(), error = %error, "Rule crashed");
            }
            other => tracing::debug!(
                rule = rule.id(),
                status = other.status(),
                violations = other.violations().len(),
                elapsed_ms,
                "Rule finished"
            ),
        }
        self.progress.rule_done(rule.id());

        RuleReport {
            rule_id: rule.id().to_string(),
            name: rule.name().to_string(),
            description: rule.description().map(str::to_string),
            outcome,
        }
    }
}

fn execute(rule: &dyn Rule, corpus: &Corpus, classifier: &LineClassifier) -> RuleOutcome {
    let ctx = RuleContext::new(corpus, classifier);
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(&ctx))) {
        Ok(Ok(mut violations)) => {
            sort_violations(&mut violations);
            RuleOutcome::from_violations(violations)
        }
        Ok(Err(err)) => RuleOutcome::Crashed {
            error: err.to_string(),
        },
        Err(payload) => RuleOutcome::Crashed {
            error: format!("rule panicked: {}", panic_message(payload.as_ref())),
        },
    }
}

/// Run on a worker thread and stop waiting after `limit`.
///
/// A timed-out worker is left detached; it only reads shared data and its
/// result is discarded.
fn execute_with_timeout(
    rule: Arc<dyn Rule>,
    corpus: Arc<Corpus>,
    classifier: Arc<LineClassifier>,
    limit: Duration,
) -> RuleOutcome {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("rule-{}", rule.id()))
        .spawn(move || {
            let outcome = execute(rule.as_ref(), &corpus, &classifier);
            let _ = tx.send(outcome);
        });
    if let Err(err) = spawned {
        return RuleOutcome::Crashed {
            error: format!("cannot start rule worker: {err}"),
        };
    }

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => RuleOutcome::Crashed {
            error: format!("timed out after {} ms", limit.as_millis()),
        },
        Err(RecvTimeoutError::Disconnected) => RuleOutcome::Crashed {
            error: "rule worker exited without a result".to_string(),
        },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
