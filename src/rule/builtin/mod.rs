//! Rule kinds that can be declared in configuration.
//!
//! Each `[[rules]]` entry compiles into one [`Rule`]. `forbidden` and `window`
//! are thin wrappers over [`PatternRule`]; the rest walk the extractor output
//! directly because they relate several constructs to each other.

mod enum_coverage;
mod forbidden;
mod function_body;
mod paired_calls;
mod struct_field;
mod window;

pub use enum_coverage::EnumCoverageRule;
pub use forbidden::ForbiddenRule;
pub use function_body::FunctionBodyRule;
pub use paired_calls::PairedCallsRule;
pub use struct_field::StructFieldRule;

use std::sync::Arc;

use regex::Regex;

use crate::config::{RuleKind, RuleSpec};
use crate::error::{FitnessGuardError, Result};
use crate::scanner::{FileScope, SourceFile};

use super::{MissingPolicy, Rule, RuleContext, Severity, Violation};

/// Compile one configured rule.
///
/// # Errors
/// Returns an error if a regex or glob in the entry does not compile.
pub fn compile_rule(spec: &RuleSpec) -> Result<Arc<dyn Rule>> {
    let meta = RuleMeta::from_spec(spec)?;
    let rule: Arc<dyn Rule> = match &spec.kind {
        RuleKind::Forbidden { patterns } => Arc::new(ForbiddenRule::new(spec, patterns)?),
        RuleKind::Window {
            function,
            anchor,
            required,
            before,
            after,
            message,
        } => Arc::new(window::compile(
            spec,
            function.clone(),
            anchor,
            required,
            (*before, *after),
            message.as_deref(),
        )?),
        RuleKind::EnumCoverage {
            enum_name,
            enum_files,
            function,
            argument,
            value_filter,
        } => Arc::new(EnumCoverageRule::new(
            meta,
            enum_name.clone(),
            FileScope::new(enum_files)?,
            function.clone(),
            *argument,
            value_filter.as_deref().map(compile_regex).transpose()?,
        )),
        RuleKind::FunctionBody {
            function,
            requires,
            order,
        } => Arc::new(FunctionBodyRule::new(meta, function.clone(), requires, order)?),
        RuleKind::StructField {
            struct_name,
            field,
            field_type,
        } => Arc::new(StructFieldRule::new(
            meta,
            struct_name.clone(),
            field.clone(),
            field_type.clone(),
        )),
        RuleKind::PairedCalls { pairs } => Arc::new(PairedCallsRule::new(meta, pairs.clone())),
    };
    tracing::debug!(rule = %spec.id, kind = spec.kind.name(), "Compiled rule");
    Ok(rule)
}

/// Compile every configured rule, keeping declaration order.
///
/// # Errors
/// Returns the first compilation error.
pub fn compile_rules(specs: &[RuleSpec]) -> Result<Vec<Arc<dyn Rule>>> {
    specs.iter().map(compile_rule).collect()
}

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| FitnessGuardError::invalid_regex(pattern, e))
}

/// Fields every configured rule shares.
#[derive(Debug, Clone)]
pub(crate) struct RuleMeta {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub on_missing: MissingPolicy,
    pub scope: FileScope,
    pub fix: Option<String>,
}

impl RuleMeta {
    fn from_spec(spec: &RuleSpec) -> Result<Self> {
        Ok(Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            severity: spec.severity,
            on_missing: spec.on_missing,
            scope: FileScope::new(&spec.files)?,
            fix: spec.fix.clone(),
        })
    }

    /// A violation at `line` of `file` with this rule's severity and fix.
    pub fn violation(&self, file: &SourceFile, line: usize, message: String) -> Violation {
        Violation::new(&self.id, self.severity, file.relative_path(), message)
            .with_line(line)
            .with_snippet(file.line(line).unwrap_or_default())
            .with_fix(self.fix.as_deref())
    }

    /// The absence finding for a construct, if the policy reports one.
    pub fn missing(&self, kind: &str, name: &str) -> Option<Violation> {
        self.on_missing.violation(
            &self.id,
            self.scope.describe(),
            format!("{kind} '{name}' not found"),
        )
    }

    /// First file in scope where `find` locates the construct.
    pub fn find_first<'a, T>(
        &self,
        ctx: &RuleContext<'a>,
        scope: &'a FileScope,
        find: impl Fn(&'a SourceFile) -> Option<T>,
    ) -> Option<(&'a SourceFile, T)> {
        ctx.files(scope)
            .find_map(|file| find(file).map(|found| (file, found)))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
