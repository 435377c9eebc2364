use regex::Regex;
use serde::Serialize;

use crate::classifier::{CommentDetector, LineClass, LineClassifier};
use crate::scanner::SourceFile;

use super::fields::is_identifier;

/// Words that may directly precede a call without making it a declaration.
const CALL_KEYWORDS: &[&str] = &["return", "else", "case", "do", "sizeof", "goto"];

/// One invocation of a named function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub name: String,
    /// 1-indexed line of the callee name.
    pub line: usize,
    /// Byte offset of the callee name in the file.
    pub offset: usize,
    /// Arguments split at top-level commas, trimmed.
    pub args: Vec<String>,
    #[serde(skip)]
    pub class: LineClass,
}

impl CallSite {
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Every call to `name` in `file` outside comments.
///
/// Definitions (`name(...) {`), prototypes and `#define name(` are not calls;
/// a call inside a macro body such as `#define FIRE(g) name(g, X)` is.
/// Calls inside other directives (`#if`, `#include`) are skipped.
/// Calls on exception-marked lines are returned with their class so callers
/// can decide whether they count.
#[must_use]
pub fn find_call_sites(file: &SourceFile, name: &str, classifier: &LineClassifier) -> Vec<CallSite> {
    let Ok(pattern) = Regex::new(&format!(r"\b{}\s*\(", regex::escape(name))) else {
        return Vec::new();
    };
    let text = file.text();
    let masked = CommentDetector::mask_code(text);
    let classes = classifier.classify_lines(file.lines().map(|(_, line)| line));
    let mut sites = Vec::new();

    for m in pattern.find_iter(&masked) {
        let open = m.end() - 1;
        let Some(close) = matching_paren(&masked, open) else {
            continue;
        };
        if masked[close + 1..].trim_start().starts_with('{') {
            continue;
        }
        let line_start = masked[..m.start()].rfind('\n').map_or(0, |i| i + 1);
        if looks_like_declaration(&masked[line_start..m.start()]) {
            continue;
        }

        let line = file.line_of_offset(m.start());
        let class = classes.get(line - 1).copied().unwrap_or(LineClass::Code);
        if !class.is_executable() {
            continue;
        }

        let args = split_top_level(&masked[open + 1..close], &text[open + 1..close])
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let args = if args.len() == 1 && args[0].is_empty() {
            Vec::new()
        } else {
            args
        };

        sites.push(CallSite {
            name: name.to_string(),
            line,
            offset: m.start(),
            args,
            class,
        });
    }

    sites
}

/// Index of the `)` closing the `(` at `open`, in masked text.
fn matching_paren(masked: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in masked.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// True when the text before the callee on its line reads as a return type,
/// the macro name of a `#define`, or a non-define directive rather than an
/// expression.
fn looks_like_declaration(before: &str) -> bool {
    let before = before.trim();
    if before.is_empty() {
        return false;
    }
    if let Some(directive) = before.strip_prefix('#') {
        let directive = directive.trim_start();
        return !directive.starts_with("define") || directive == "define";
    }
    let type_like = before
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*' || c.is_whitespace());
    if !type_like {
        return false;
    }
    let first_word = before
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    is_identifier(first_word) && !CALL_KEYWORDS.contains(&first_word)
}

/// Split `original` at commas that are top-level in `masked`.
///
/// Both strings must have identical byte layout; `masked` decides where the
/// commas are, `original` supplies the returned text.
pub(crate) fn split_top_level<'a>(masked: &str, original: &'a str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in masked.bytes().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(original.get(start..i).unwrap_or_default().trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(original.get(start..).unwrap_or_default().trim());
    parts
}

#[cfg(test)]
#[path = "calls_tests.rs"]
mod tests;
