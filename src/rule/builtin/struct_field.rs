use crate::error::Result;
use crate::extractor::find_struct;

use super::{Rule, RuleContext, RuleMeta, Violation};

/// A struct must declare a field, optionally of a given type.
///
/// Only fields the extractor can parse are visible, so a field declared in an
/// unusual form (function pointer, several declarators) reads as missing.
#[derive(Debug, Clone)]
pub struct StructFieldRule {
    meta: RuleMeta,
    struct_name: String,
    field: String,
    field_type: Option<String>,
}

impl StructFieldRule {
    pub(crate) const fn new(
        meta: RuleMeta,
        struct_name: String,
        field: String,
        field_type: Option<String>,
    ) -> Self {
        Self {
            meta,
            struct_name,
            field,
            field_type,
        }
    }
}

impl Rule for StructFieldRule {
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
        let Some((file, def)) = self.meta.find_first(ctx, &self.meta.scope, |file| {
            find_struct(file, &self.struct_name, ctx.classifier())
        }) else {
            return Ok(self.meta.missing("struct", &self.struct_name).into_iter().collect());
        };

        let Some(field) = def.field(&self.field) else {
            return Ok(vec![
                self.meta
                    .violation(
                        file,
                        def.start_line,
                        format!("struct {} has no field '{}'", self.struct_name, self.field),
                    )
                    .with_check("field"),
            ]);
        };

        match &self.field_type {
            Some(expected) if !field.type_matches(expected) => Ok(vec![
                self.meta
                    .violation(
                        file,
                        field.line,
                        format!(
                            "{}.{} has type '{}', expected '{expected}'",
                            self.struct_name, field.name, field.ty
                        ),
                    )
                    .with_check("field-type"),
            ]),
            _ => Ok(Vec::new()),
        }
    }
}
