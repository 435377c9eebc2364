use indexmap::IndexSet;
use regex::Regex;

use crate::error::Result;
use crate::extractor::{find_call_sites, find_enum};
use crate::scanner::FileScope;

use super::{Rule, RuleContext, RuleMeta, Violation};

/// Every value of an enum must be passed to a trigger function somewhere.
#[derive(Debug, Clone)]
pub struct EnumCoverageRule {
    meta: RuleMeta,
    enum_name: String,
    enum_scope: FileScope,
    function: String,
    argument: usize,
    value_filter: Option<Regex>,
}

impl EnumCoverageRule {
    pub(crate) const fn new(
        meta: RuleMeta,
        enum_name: String,
        enum_scope: FileScope,
        function: String,
        argument: usize,
        value_filter: Option<Regex>,
    ) -> Self {
        Self {
            meta,
            enum_name,
            enum_scope,
            function,
            argument,
            value_filter,
        }
    }

    /// Identifiers appearing in the watched argument of every trigger call.
    fn covered_values(&self, ctx: &RuleContext<'_>) -> IndexSet<String> {
        let mut covered = IndexSet::new();
        for file in ctx.files(&self.meta.scope) {
            for call in find_call_sites(file, &self.function, ctx.classifier()) {
                if let Some(arg) = call.arg(self.argument) {
                    covered.extend(
                        arg.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                            .filter(|token| !token.is_empty())
                            .map(str::to_string),
                    );
                }
            }
        }
        covered
    }
}

impl Rule for EnumCoverageRule {
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
        let Some((file, def)) = self.meta.find_first(ctx, &self.enum_scope, |file| {
            find_enum(file, &self.enum_name, ctx.classifier())
        }) else {
            return Ok(self.meta.missing("enum", &self.enum_name).into_iter().collect());
        };

        let covered = self.covered_values(ctx);
        tracing::debug!(
            rule = %self.meta.id,
            values = def.values.len(),
            covered = covered.len(),
            "Checked enum coverage"
        );

        let violations = def
            .values
            .iter()
            .filter(|(value, _)| {
                self.value_filter
                    .as_ref()
                    .is_none_or(|filter| filter.is_match(value))
            })
            .filter(|(value, _)| !covered.contains(value.as_str()))
            .map(|(value, &line)| {
                self.meta
                    .violation(
                        file,
                        line,
                        format!(
                            "{}::{value} is never passed to {}()",
                            self.enum_name, self.function
                        ),
                    )
                    .with_check("coverage")
            })
            .collect();

        Ok(violations)
    }
}
