//! Heuristic structure extraction from raw C-like text.
//!
//! Nothing here builds a syntax tree. Headers are found with regexes over a
//! copy of the text whose comments and literal contents are blanked, and bodies
//! are delimited by counting braces. Every finder returns `Option`: a construct
//! that cannot be found is absent, never an error.

mod body;
mod calls;
mod fields;
mod types;

pub use body::{ExtractedBody, extract_all, extract_body, first_of};
pub use calls::{CallSite, find_call_sites};
pub use fields::{parse_enum_values, parse_fields};
pub use types::{EnumDef, Field, FunctionBody, StructDef, StructuralElement};

use regex::Regex;

use crate::classifier::{CommentDetector, LineClassifier};
use crate::scanner::SourceFile;

/// Header regex for a definition of function `name`.
///
/// Requires at least one return-type token before the name and `{` after the
/// parameter list, so prototypes and calls do not match.
#[must_use]
pub fn function_header(name: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:[A-Za-z_]\w*[\s*]+)+{}\s*\([^;{{}}]*\)\s*\{{",
        regex::escape(name)
    ))
    .ok()
}

/// Find the definition of function `name`.
#[must_use]
pub fn find_function(file: &SourceFile, name: &str) -> Option<FunctionBody> {
    let header = function_header(name)?;
    let body = extract_body(file.text(), &header)?;
    Some(FunctionBody {
        name: name.to_string(),
        start_line: body.start_line,
        end_line: body.end_line(),
        body: body.inner().to_string(),
        body_line: body.open_line(),
        text: body.text,
    })
}

/// Find the definition of struct `name`, as `struct name { ... }` or
/// `typedef struct [tag] { ... } name;`.
#[must_use]
pub fn find_struct(
    file: &SourceFile,
    name: &str,
    classifier: &LineClassifier,
) -> Option<StructDef> {
    let body = find_aggregate(file.text(), "struct", name)?;
    Some(StructDef {
        name: name.to_string(),
        start_line: body.start_line,
        end_line: body.end_line(),
        fields: parse_fields(body.inner(), body.open_line(), classifier),
        text: body.text,
    })
}

/// Find the definition of enum `name`, in the same shapes as [`find_struct`].
#[must_use]
pub fn find_enum(file: &SourceFile, name: &str, classifier: &LineClassifier) -> Option<EnumDef> {
    let body = find_aggregate(file.text(), "enum", name)?;
    Some(EnumDef {
        name: name.to_string(),
        start_line: body.start_line,
        end_line: body.end_line(),
        values: parse_enum_values(body.inner(), body.open_line(), classifier),
        text: body.text,
    })
}

fn find_aggregate(text: &str, keyword: &str, name: &str) -> Option<ExtractedBody> {
    let escaped = regex::escape(name);
    let tagged = Regex::new(&format!(r"\b{keyword}\s+{escaped}\s*\{{")).ok()?;
    if let Some(body) = extract_body(text, &tagged) {
        return Some(body);
    }

    let typedef = Regex::new(&format!(r"\btypedef\s+{keyword}\b[^;{{}}]*\{{")).ok()?;
    let alias = Regex::new(&format!(r"^\s*{escaped}\s*[;,\[]")).ok()?;
    let masked = CommentDetector::mask_code(text);
    extract_all(text, &typedef)
        .into_iter()
        .find(|body| alias.is_match(&masked[body.end_offset..]))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
