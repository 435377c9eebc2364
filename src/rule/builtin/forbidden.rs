use crate::config::{ForbiddenPattern, RuleSpec};
use crate::error::Result;
use crate::rule::{Locator, PatternRule};

use super::{Rule, RuleContext, Violation, compile_regex};

/// Flags every code line matching any of a set of patterns.
#[derive(Debug, Clone)]
pub struct ForbiddenRule {
    id: String,
    name: String,
    description: Option<String>,
    patterns: Vec<PatternRule>,
}

impl ForbiddenRule {
    /// # Errors
    /// Returns an error if a pattern or scope glob is invalid.
    pub fn new(spec: &RuleSpec, patterns: &[ForbiddenPattern]) -> Result<Self> {
        let named = patterns.len() > 1;
        let patterns = patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                let mut builder = PatternRule::builder(&spec.id, &spec.name)
                    .files(spec.files.clone())
                    .severity(spec.severity)
                    .fix(spec.fix.clone())
                    .locate(Locator::Lines(compile_regex(&pattern.regex)?))
                    .message(pattern.message.clone());
                if named {
                    builder = builder.check(format!("pattern-{}", i + 1));
                }
                builder.build()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            patterns,
        })
    }
}

impl Rule for ForbiddenRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for pattern in &self.patterns {
            violations.extend(pattern.check(ctx)?);
        }
        Ok(violations)
    }
}
