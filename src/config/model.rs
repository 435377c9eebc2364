use serde::{Deserialize, Serialize};

use crate::rule::{MissingPolicy, Severity};

/// Root configuration, built once at startup and shared by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Corpus discovery (roots, extensions, excluded directories).
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Line classification (exception markers).
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Rule execution settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Declarative rules [[rules]], run in declared order.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// Scanner configuration for corpus discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Source roots relative to the scan root, each with its own extensions.
    #[serde(default = "default_roots")]
    pub roots: Vec<SourceRoot>,

    /// Directory names skipped anywhere in a path (vendored/external code).
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Extra glob patterns matched against root-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Follow symbolic links. Links resolving outside the scan root are skipped.
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            exclude_dirs: default_exclude_dirs(),
            exclude: Vec::new(),
            follow_links: false,
        }
    }
}

/// One inclusion rule: a subdirectory and the extensions collected from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRoot {
    pub dir: String,
    pub extensions: Vec<String>,
}

impl SourceRoot {
    #[must_use]
    pub fn new(dir: &str, extensions: &[&str]) -> Self {
        Self {
            dir: dir.to_string(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Substrings that excuse the line they appear on and the next non-blank line.
    #[serde(default = "default_exception_markers")]
    pub exception_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            exception_markers: default_exception_markers(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Run rules on the rayon pool instead of one after another.
    #[serde(default)]
    pub parallel: bool,

    /// Wall-clock budget per rule in milliseconds. A rule exceeding it crashes.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// A declarative rule entry [[rules]].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSpec {
    /// Stable identifier, e.g. "FF-001".
    pub id: String,

    /// Human-readable name shown in reports.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Severity of violations produced by this rule.
    #[serde(default)]
    pub severity: Severity,

    /// What to do when the target construct does not exist.
    #[serde(default)]
    pub on_missing: MissingPolicy,

    /// Glob patterns (root-relative) selecting the files this rule reads.
    #[serde(default = "default_rule_files")]
    pub files: Vec<String>,

    /// Fix suggestion attached to every violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,

    #[serde(flatten)]
    pub kind: RuleKind,
}

/// The rule kinds a [[rules]] entry can declare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleKind {
    /// Flag every code line matching one of the patterns.
    Forbidden { patterns: Vec<ForbiddenPattern> },

    /// Every value of an enum must appear as an argument of a trigger call.
    EnumCoverage {
        enum_name: String,
        /// Files searched for the enum definition.
        #[serde(default = "default_header_files")]
        enum_files: Vec<String>,
        /// Function whose call sites count as coverage.
        function: String,
        /// 0-based argument position holding the enum value.
        #[serde(default)]
        argument: usize,
        /// Only values matching this regex must be covered.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_filter: Option<String>,
    },

    /// Lines matching `anchor` need `required` within a window of lines.
    Window {
        /// Restrict the search to this function body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        function: Option<String>,
        anchor: String,
        required: String,
        #[serde(default = "default_window")]
        before: usize,
        #[serde(default = "default_window")]
        after: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// A function body must contain patterns, optionally in a given order.
    FunctionBody {
        function: String,
        #[serde(default)]
        requires: Vec<BodyRequirement>,
        /// Pairs of requirement names: the first must occur before the second.
        #[serde(default)]
        order: Vec<[String; 2]>,
    },

    /// A struct must declare a field, optionally with a given type.
    StructField {
        struct_name: String,
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field_type: Option<String>,
    },

    /// Within a file, calling `open` requires also calling `close`.
    PairedCalls { pairs: Vec<CallPair> },
}

impl RuleKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Forbidden { .. } => "forbidden",
            Self::EnumCoverage { .. } => "enum-coverage",
            Self::Window { .. } => "window",
            Self::FunctionBody { .. } => "function-body",
            Self::StructField { .. } => "struct-field",
            Self::PairedCalls { .. } => "paired-calls",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForbiddenPattern {
    pub regex: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyRequirement {
    /// Sub-check name, also used by `order`.
    pub name: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallPair {
    pub open: String,
    pub close: String,
}

fn default_roots() -> Vec<SourceRoot> {
    vec![
        SourceRoot::new("src", &["c", "h"]),
        SourceRoot::new("include", &["h"]),
    ]
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        "external".to_string(),
        "vendor".to_string(),
        "third_party".to_string(),
    ]
}

fn default_exception_markers() -> Vec<String> {
    vec![
        "// EXCEPTION:".to_string(),
        "/* EXCEPTION:".to_string(),
        "// FFI:".to_string(),
        "/* FFI:".to_string(),
    ]
}

fn default_rule_files() -> Vec<String> {
    vec!["**/*.c".to_string(), "**/*.h".to_string()]
}

fn default_header_files() -> Vec<String> {
    vec!["**/*.h".to_string()]
}

const fn default_window() -> usize {
    30
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
