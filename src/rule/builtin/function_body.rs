use std::cmp::Ordering;

use regex::Regex;

use crate::classifier::CommentDetector;
use crate::config::BodyRequirement;
use crate::error::{FitnessGuardError, Result};
use crate::extractor::{FunctionBody, find_function, first_of};
use crate::scanner::SourceFile;

use super::{Rule, RuleContext, RuleMeta, Violation, compile_regex};

#[derive(Debug, Clone)]
struct Requirement {
    name: String,
    pattern: Regex,
    message: Option<String>,
}

/// A function must contain required patterns, some of them in a fixed order.
#[derive(Debug, Clone)]
pub struct FunctionBodyRule {
    meta: RuleMeta,
    function: String,
    requires: Vec<Requirement>,
    /// Index pairs into `requires`: the first must occur before the second.
    order: Vec<(usize, usize)>,
}

impl FunctionBodyRule {
    pub(crate) fn new(
        meta: RuleMeta,
        function: String,
        requires: &[BodyRequirement],
        order: &[[String; 2]],
    ) -> Result<Self> {
        let requires = requires
            .iter()
            .map(|r| {
                Ok(Requirement {
                    name: r.name.clone(),
                    pattern: compile_regex(&r.pattern)?,
                    message: r.message.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let index_of = |name: &str| {
            requires.iter().position(|r| r.name == name).ok_or_else(|| {
                FitnessGuardError::rule(&meta.id, format!("unknown requirement '{name}' in order"))
            })
        };
        let order = order
            .iter()
            .map(|[first, second]| Ok((index_of(first)?, index_of(second)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            meta,
            function,
            requires,
            order,
        })
    }

    fn check_requirements(&self, file: &SourceFile, f: &FunctionBody, masked: &str) -> Vec<Violation> {
        self.requires
            .iter()
            .filter(|r| !r.pattern.is_match(masked))
            .map(|r| {
                let message = r.message.clone().unwrap_or_else(|| {
                    format!(
                        "{}() must contain '{}' ({})",
                        self.function,
                        r.pattern.as_str(),
                        r.name
                    )
                });
                self.meta
                    .violation(file, f.start_line, message)
                    .with_check(r.name.as_str())
            })
            .collect()
    }

    fn check_order(&self, file: &SourceFile, f: &FunctionBody, masked: &str) -> Vec<Violation> {
        self.order
            .iter()
            .filter_map(|&(a, b)| {
                let (first, second) = (&self.requires[a], &self.requires[b]);
                if first_of(&f.text, &first.pattern, &second.pattern) != Some(Ordering::Greater) {
                    return None;
                }
                let offset = first.pattern.find(masked).map_or(0, |m| m.start());
                let line = f.start_line + masked[..offset].matches('\n').count();
                Some(
                    self.meta
                        .violation(
                            file,
                            line,
                            format!(
                                "'{}' must come before '{}' in {}()",
                                first.name, second.name, self.function
                            ),
                        )
                        .with_check(format!("order:{}<{}", first.name, second.name)),
                )
            })
            .collect()
    }
}

impl Rule for FunctionBodyRule {
    fn id(&self) -> &str {
        &self.meta.id
    }

    fn name(&self) -> &str {
        &self.meta.name
    }

    fn description(&self) -> Option<&str> {
        self.meta.description.as_deref()
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>> {
        let Some((file, f)) = self
            .meta
            .find_first(ctx, &self.meta.scope, |file| find_function(file, &self.function))
        else {
            return Ok(self.meta.missing("function", &self.function).into_iter().collect());
        };

        let masked = CommentDetector::mask_code(&f.text);
        let mut violations = self.check_requirements(file, &f, &masked);
        violations.extend(self.check_order(file, &f, &masked));
        Ok(violations)
    }
}
