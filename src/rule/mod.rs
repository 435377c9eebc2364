pub mod builtin;
mod pattern;
mod violation;

pub use crate::scanner::FileScope;
pub use pattern::{Locator, MessageTemplate, Neighborhood, PatternRule, PatternRuleBuilder, Site};
pub use violation::{CORPUS_RULE_ID, Severity, Violation, sort_violations};

use serde::{Deserialize, Serialize};

use crate::classifier::{LineClass, LineClassifier};
use crate::error::Result;
use crate::scanner::{Corpus, SourceFile};

/// A structural check over the whole corpus.
///
/// Rules only read the corpus. Returning `Err` or panicking marks the rule as
/// crashed without affecting other rules.
pub trait Rule: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Run the rule and return every violation found.
    ///
    /// # Errors
    /// Returns an error when the rule cannot evaluate its own inputs.
    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>>;
}

/// What a rule reports when the construct it targets does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Absence is not a finding.
    #[default]
    Skip,
    Info,
    Warn,
    Fail,
}

impl MissingPolicy {
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Skip => None,
            Self::Info => Some(Severity::Info),
            Self::Warn => Some(Severity::Warn),
            Self::Fail => Some(Severity::Fail),
        }
    }

    /// Build the absence finding, if this policy reports one.
    #[must_use]
    pub fn violation(
        self,
        rule_id: &str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Option<Violation> {
        self.severity()
            .map(|severity| Violation::new(rule_id, severity, path, message).with_check("missing"))
    }
}

/// Read-only view handed to rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    corpus: &'a Corpus,
    classifier: &'a LineClassifier,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub const fn new(corpus: &'a Corpus, classifier: &'a LineClassifier) -> Self {
        Self { corpus, classifier }
    }

    #[must_use]
    pub const fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    #[must_use]
    pub const fn classifier(&self) -> &'a LineClassifier {
        self.classifier
    }

    /// Files selected by `scope`, in corpus order.
    pub fn files(&self, scope: &'a FileScope) -> impl Iterator<Item = &'a SourceFile> + 'a {
        self.corpus.matching(scope)
    }

    /// Classification of every line of `file`, index 0 = line 1.
    #[must_use]
    pub fn classes(&self, file: &SourceFile) -> Vec<LineClass> {
        self.classifier
            .classify_lines(file.lines().map(|(_, line)| line))
    }

    /// `(line number, text)` of every `Code` line of `file`.
    #[must_use]
    pub fn code_lines<'f>(&self, file: &'f SourceFile) -> Vec<(usize, &'f str)> {
        let classes = self.classes(file);
        file.lines()
            .zip(classes)
            .filter(|(_, class)| class.is_code())
            .map(|(line, _)| line)
            .collect()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
