use crate::config::CallPair;
use crate::error::Result;
use crate::extractor::find_call_sites;

use super::{Rule, RuleContext, RuleMeta, Violation};

/// Within one file, calling `open` requires a call to `close` as well.
#[derive(Debug, Clone)]
pub struct PairedCallsRule {
    meta: RuleMeta,
    pairs: Vec<CallPair>,
}

impl PairedCallsRule {
    pub(crate) const fn new(meta: RuleMeta, pairs: Vec<CallPair>) -> Self {
        Self { meta, pairs }
    }
}

impl Rule for PairedCallsRule {
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
        let mut violations = Vec::new();
        for file in ctx.files(&self.meta.scope) {
            for pair in &self.pairs {
                let opens: Vec<_> = find_call_sites(file, &pair.open, ctx.classifier())
                    .into_iter()
                    .filter(|call| call.class.is_code())
                    .collect();
                let Some(first_open) = opens.first() else {
                    continue;
                };
                if find_call_sites(file, &pair.close, ctx.classifier()).is_empty() {
                    violations.push(
                        self.meta
                            .violation(
                                file,
                                first_open.line,
                                format!(
                                    "{}() is called without a matching {}()",
                                    pair.open, pair.close
                                ),
                            )
                            .with_check(pair.open.as_str()),
                    );
                }
            }
        }
        Ok(violations)
    }
}
