//! Generic locate-then-check rule.
//!
//! A [`PatternRule`] finds sites with a [`Locator`], gathers the lines around
//! each site per its [`Neighborhood`], and reports every site whose predicate
//! returns false. New checks are written by combining these parts instead of
//! touching the loader, extractor or engine.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::classifier::LineClass;
use crate::error::{FitnessGuardError, Result};
use crate::extractor::{
    CallSite, StructuralElement, find_call_sites, find_enum, find_function, find_struct,
};
use crate::scanner::{FileScope, SourceFile};

use super::{MissingPolicy, Rule, RuleContext, Severity, Violation};

/// How sites are found in a file.
#[derive(Debug, Clone)]
pub enum Locator {
    /// Every `Code` line whose text outside comments and literals matches
    /// the regex.
    Lines(Regex),
    Function(String),
    Struct(String),
    Enum(String),
    /// Every call to the named function on a `Code` line.
    CallSites(String),
}

impl Locator {
    /// Construct name for element and call locators.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Lines(_) => None,
            Self::Function(name) | Self::Struct(name) | Self::Enum(name) | Self::CallSites(name) => {
                Some(name)
            }
        }
    }

    const fn element_kind(&self) -> Option<&'static str> {
        match self {
            Self::Function(_) => Some("function"),
            Self::Struct(_) => Some("struct"),
            Self::Enum(_) => Some("enum"),
            Self::Lines(_) | Self::CallSites(_) => None,
        }
    }
}

/// Which lines around a site the predicate sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// The site's own line.
    #[default]
    Line,
    /// Lines `before` above through `after` below the site.
    Window { before: usize, after: usize },
    /// The located element, or the enclosing `within` function, or the file.
    Body,
}

/// One located site.
#[derive(Debug, Clone)]
pub struct Site<'a> {
    pub file: &'a SourceFile,
    pub line: usize,
    /// Matched text for line locators, the construct name otherwise.
    pub matched: String,
    pub element: Option<StructuralElement>,
    pub call: Option<CallSite>,
    /// Non-comment lines of the neighborhood, exception-marked lines included,
    /// with trailing comments and literal contents blanked.
    pub context: Vec<(usize, &'a str)>,
}

impl Site<'_> {
    #[must_use]
    pub fn line_text(&self) -> &str {
        self.file.line(self.line).unwrap_or_default()
    }

    /// True when any neighborhood line matches `pattern`.
    #[must_use]
    pub fn context_matches(&self, pattern: &Regex) -> bool {
        self.context.iter().any(|(_, line)| pattern.is_match(line))
    }

    #[must_use]
    pub fn context_text(&self) -> String {
        self.context
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Violation message with `{name}`, `{match}`, `{file}` and `{line}`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    #[must_use]
    pub fn render(&self, site: &Site<'_>, name: &str) -> String {
        self.0
            .replace("{name}", name)
            .replace("{match}", &site.matched)
            .replace("{file}", site.file.relative_path())
            .replace("{line}", &site.line.to_string())
    }
}

type Predicate = Arc<dyn Fn(&Site<'_>) -> bool + Send + Sync>;

const DEFAULT_FILES: [&str; 2] = ["**/*.c", "**/*.h"];

/// A rule assembled from a locator, neighborhood, predicate and message.
#[derive(Clone)]
pub struct PatternRule {
    id: String,
    name: String,
    description: Option<String>,
    severity: Severity,
    on_missing: MissingPolicy,
    scope: FileScope,
    locator: Locator,
    neighborhood: Neighborhood,
    within: Option<String>,
    predicate: Predicate,
    message: MessageTemplate,
    check: Option<String>,
    fix: Option<String>,
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("id", &self.id)
            .field("locator", &self.locator)
            .field("neighborhood", &self.neighborhood)
            .field("within", &self.within)
            .finish_non_exhaustive()
    }
}

impl PatternRule {
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> PatternRuleBuilder {
        PatternRuleBuilder::new(id.into(), name.into())
    }

    #[must_use]
    pub const fn scope(&self) -> &FileScope {
        &self.scope
    }

    /// Line span of the `within` function in `file`, if one is configured.
    /// `Some(None)` means the function is configured but absent here.
    fn region(&self, file: &SourceFile) -> Option<Option<(usize, usize)>> {
        let function = self.within.as_deref()?;
        Some(find_function(file, function).map(|f| (f.start_line, f.end_line)))
    }

    fn locate<'f>(
        &self,
        ctx: &RuleContext<'_>,
        file: &'f SourceFile,
        masked: &SourceFile,
        classes: &[LineClass],
        region: Option<(usize, usize)>,
    ) -> Vec<Site<'f>> {
        let in_region = |line: usize| region.is_none_or(|(start, end)| line >= start && line <= end);
        let is_code = |line: usize| classes.get(line - 1).is_some_and(|c| c.is_code());

        match &self.locator {
            Locator::Lines(pattern) => masked
                .lines()
                .filter(|&(n, _)| in_region(n) && is_code(n))
                .filter_map(|(n, code)| {
                    let m = pattern.find(code)?;
                    let matched = file
                        .line(n)
                        .and_then(|raw| raw.get(m.range()))
                        .unwrap_or(m.as_str());
                    Some(bare_site(file, n, matched.to_string()))
                })
                .collect(),
            Locator::CallSites(name) => find_call_sites(file, name, ctx.classifier())
                .into_iter()
                .filter(|call| in_region(call.line) && call.class.is_code())
                .map(|call| {
                    let mut site = bare_site(file, call.line, name.clone());
                    site.call = Some(call);
                    site
                })
                .collect(),
            Locator::Function(name) => find_function(file, name)
                .map(StructuralElement::Function)
                .map(|e| vec![element_site(file, e)])
                .unwrap_or_default(),
            Locator::Struct(name) => find_struct(file, name, ctx.classifier())
                .map(StructuralElement::Struct)
                .map(|e| vec![element_site(file, e)])
                .unwrap_or_default(),
            Locator::Enum(name) => find_enum(file, name, ctx.classifier())
                .map(StructuralElement::Enum)
                .map(|e| vec![element_site(file, e)])
                .unwrap_or_default(),
        }
    }

    fn fill_context<'f>(
        &self,
        site: &mut Site<'f>,
        masked: &'f SourceFile,
        classes: &[LineClass],
        region: Option<(usize, usize)>,
    ) {
        let last = site.file.line_count();
        let (start, end) = match self.neighborhood {
            Neighborhood::Line => (site.line, site.line),
            Neighborhood::Window { before, after } => {
                let (lo, hi) = region.unwrap_or((1, last));
                (
                    site.line.saturating_sub(before).max(lo),
                    (site.line + after).min(hi),
                )
            }
            Neighborhood::Body => site.element.as_ref().map_or_else(
                || region.unwrap_or((1, last)),
                |e| (e.start_line(), e.end_line()),
            ),
        };
        site.context = (start.max(1)..=end.min(last))
            .filter(|&n| classes.get(n - 1).is_some_and(|c| c.is_executable()))
            .filter_map(|n| masked.line(n).map(|text| (n, text)))
            .collect();
    }

    fn build_violation(&self, site: &Site<'_>) -> Violation {
        let name = self.locator.target().unwrap_or(&self.name);
        let mut violation = Violation::new(
            &self.id,
            self.severity,
            site.file.relative_path(),
            self.message.render(site, name),
        )
        .with_line(site.line)
        .with_snippet(site.line_text())
        .with_fix(self.fix.as_deref());
        if let Some(check) = &self.check {
            violation = violation.with_check(check.as_str());
        }
        violation
    }
}

fn bare_site(file: &SourceFile, line: usize, matched: String) -> Site<'_> {
    Site {
        file,
        line,
        matched,
        element: None,
        call: None,
        context: Vec::new(),
    }
}

fn element_site(file: &SourceFile, element: StructuralElement) -> Site<'_> {
    let mut site = bare_site(file, element.start_line(), element.name().to_string());
    site.element = Some(element);
    site
}

impl Rule for PatternRule {
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
        let mut region_found = false;
        let mut element_found = false;

        for file in ctx.files(&self.scope) {
            let region = match self.region(file) {
                Some(Some(span)) => {
                    region_found = true;
                    Some(span)
                }
                Some(None) => continue,
                None => None,
            };
            let classes = ctx.classes(file);
            let masked = file.masked();

            for mut site in self.locate(ctx, file, &masked, &classes, region) {
                element_found |= site.element.is_some();
                self.fill_context(&mut site, &masked, &classes, region);
                if !(self.predicate)(&site) {
                    violations.push(self.build_violation(&site));
                }
            }
        }

        let missing = if let Some(function) = &self.within
            && !region_found
        {
            Some(format!("function '{function}' not found"))
        } else if let (Some(kind), Some(name)) = (self.locator.element_kind(), self.locator.target())
            && !element_found
        {
            Some(format!("{kind} '{name}' not found"))
        } else {
            None
        };

        if let Some(message) = missing
            && let Some(v) = self
                .on_missing
                .violation(&self.id, self.scope.describe(), message)
        {
            violations.push(v);
        }

        Ok(violations)
    }
}

/// Builder for [`PatternRule`].
pub struct PatternRuleBuilder {
    id: String,
    name: String,
    description: Option<String>,
    severity: Severity,
    on_missing: MissingPolicy,
    files: Vec<String>,
    locator: Option<Locator>,
    neighborhood: Neighborhood,
    within: Option<String>,
    predicate: Option<Predicate>,
    message: Option<String>,
    check: Option<String>,
    fix: Option<String>,
}

impl PatternRuleBuilder {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            severity: Severity::Fail,
            on_missing: MissingPolicy::Skip,
            files: DEFAULT_FILES.iter().map(|s| (*s).to_string()).collect(),
            locator: None,
            neighborhood: Neighborhood::Line,
            within: None,
            predicate: None,
            message: None,
            check: None,
            fix: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub const fn on_missing(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }

    #[must_use]
    pub fn files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    #[must_use]
    pub fn locate(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    #[must_use]
    pub const fn neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Only consider sites inside the body of this function.
    #[must_use]
    pub fn within(mut self, function: Option<String>) -> Self {
        self.within = function;
        self
    }

    /// Sites for which `predicate` returns false are violations. Without a
    /// predicate every located site is a violation.
    #[must_use]
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Site<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Pass when some neighborhood line matches `pattern`.
    #[must_use]
    pub fn require_nearby(self, pattern: Regex) -> Self {
        self.predicate(move |site| site.context_matches(&pattern))
    }

    #[must_use]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    #[must_use]
    pub fn check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    #[must_use]
    pub fn fix(mut self, fix: Option<String>) -> Self {
        self.fix = fix;
        self
    }

    /// # Errors
    /// Returns an error if no locator was set or a scope glob is invalid.
    pub fn build(self) -> Result<PatternRule> {
        let locator = self.locator.ok_or_else(|| {
            FitnessGuardError::rule(&self.id, "pattern rule needs a locator")
        })?;
        Ok(PatternRule {
            scope: FileScope::new(&self.files)?,
            locator,
            neighborhood: self.neighborhood,
            within: self.within,
            predicate: self
                .predicate
                .unwrap_or_else(|| Arc::new(|_: &Site<'_>| false)),
            message: MessageTemplate::new(
                self.message.unwrap_or_else(|| "'{match}' is not allowed".to_string()),
            ),
            check: self.check,
            fix: self.fix,
            id: self.id,
            name: self.name,
            description: self.description,
            severity: self.severity,
            on_missing: self.on_missing,
        })
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
