use indexmap::IndexMap;

use crate::classifier::{CommentDetector, LineClassifier};

use super::Field;
use super::calls::split_top_level;

/// Parse struct members from the text between a struct's braces.
///
/// `first_line` is the absolute line the text starts on (the line of `{`).
/// Comment, blank and nested-aggregate lines are skipped; exception-marked
/// lines still declare fields. Each `;`-terminated declaration on a line is
/// parsed on its own, and ones that are not `<type> <name> [array];` are
/// omitted.
#[must_use]
pub fn parse_fields(inner: &str, first_line: usize, classifier: &LineClassifier) -> Vec<Field> {
    let classes = classifier.classify_lines(inner.lines());
    let masked = CommentDetector::mask_code(inner);
    let mut depth = 0usize;
    let mut fields = Vec::new();

    for (i, (line, class)) in masked.lines().zip(classes).enumerate() {
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        let nested = depth > 0 || opens > 0 || closes > 0;
        depth = (depth + opens).saturating_sub(closes);
        if nested || !class.is_executable() {
            continue;
        }
        fields.extend(
            line.split_inclusive(';')
                .filter_map(|declaration| parse_field(declaration.trim(), first_line + i)),
        );
    }

    fields
}

fn parse_field(declaration: &str, line: usize) -> Option<Field> {
    let decl = declaration.strip_suffix(';')?.trim_end();
    if decl.contains(['(', ')', ',', ':', '=', '{', '}']) {
        return None;
    }

    let (head, array) = match decl.find('[') {
        Some(i) => (decl[..i].trim_end(), Some(decl[i..].trim().to_string())),
        None => (decl, None),
    };

    let name_start = head
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(0, |i| i + 1);
    let name = &head[name_start..];
    let ty = head[..name_start].split_whitespace().collect::<Vec<_>>().join(" ");

    if !is_identifier(name) || !ty.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(Field {
        ty,
        name: name.to_string(),
        array,
        declaration: declaration.to_string(),
        line,
    })
}

/// Parse enumerators from the text between an enum's braces.
///
/// Each `NAME [= expr]` item on a code or exception-marked line is recorded
/// with its absolute line. Items that do not start with an identifier are skipped.
#[must_use]
pub fn parse_enum_values(
    inner: &str,
    first_line: usize,
    classifier: &LineClassifier,
) -> IndexMap<String, usize> {
    let classes = classifier.classify_lines(inner.lines());
    let masked = CommentDetector::mask_code(inner);
    let mut values = IndexMap::new();

    for (i, (line, class)) in masked.lines().zip(classes).enumerate() {
        if !class.is_executable() {
            continue;
        }
        for item in split_top_level(line, line) {
            let name = item.split('=').next().unwrap_or_default().trim();
            if is_identifier(name) {
                values.entry(name.to_string()).or_insert(first_line + i);
            }
        }
    }

    values
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
