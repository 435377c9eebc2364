use std::cmp::Ordering;

use regex::Regex;

use crate::classifier::CommentDetector;

/// A brace-balanced region of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBody {
    /// Byte offset where the header match starts.
    pub header_offset: usize,
    /// Byte offset of the opening `{`.
    pub open_offset: usize,
    /// Byte offset just past the closing `}`.
    pub end_offset: usize,
    /// 1-indexed line of the header start.
    pub start_line: usize,
    /// Header start through closing brace, inclusive.
    pub text: String,
}

impl ExtractedBody {
    /// Text between the braces.
    #[must_use]
    pub fn inner(&self) -> &str {
        let open = self.open_offset - self.header_offset;
        let close = self.end_offset - self.header_offset - 1;
        &self.text[open + 1..close]
    }

    /// 1-indexed line holding the opening brace.
    #[must_use]
    pub fn open_line(&self) -> usize {
        let open = self.open_offset - self.header_offset;
        self.start_line + count_newlines(&self.text[..open])
    }

    /// 1-indexed line holding the closing brace.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.start_line + count_newlines(&self.text)
    }
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Extract the first body whose header matches `header`.
///
/// Braces inside comments and string or char literals are ignored. Returns
/// `None` when nothing matches or the body never closes.
#[must_use]
pub fn extract_body(text: &str, header: &Regex) -> Option<ExtractedBody> {
    let masked = CommentDetector::mask_code(text);
    header
        .find_iter(&masked)
        .find_map(|m| balance_from(text, &masked, m.start()))
}

/// Every non-overlapping body whose header matches `header`, in text order.
#[must_use]
pub fn extract_all(text: &str, header: &Regex) -> Vec<ExtractedBody> {
    let masked = CommentDetector::mask_code(text);
    let mut bodies = Vec::new();
    let mut cursor = 0;
    while let Some(m) = header.find_at(&masked, cursor) {
        match balance_from(text, &masked, m.start()) {
            Some(body) => {
                cursor = body.end_offset;
                bodies.push(body);
            }
            None => cursor = m.end().max(m.start() + 1),
        }
        if cursor >= masked.len() {
            break;
        }
    }
    bodies
}

/// Scan forward from `start` to the first `{` and count until balance.
fn balance_from(text: &str, masked: &str, start: usize) -> Option<ExtractedBody> {
    let bytes = masked.as_bytes();
    let open = start + masked[start..].find('{')?;

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let end = i + 1;
                    return Some(ExtractedBody {
                        header_offset: start,
                        open_offset: open,
                        end_offset: end,
                        start_line: count_newlines(text.get(..start)?) + 1,
                        text: text.get(start..end)?.to_string(),
                    });
                }
            }
            _ => {}
        }
    }
    None
}

/// Compare where `first` and `second` first match inside `body`.
///
/// Comments and literal contents are ignored. Returns `None` if either
/// pattern is absent. Byte offsets order the same way character offsets do.
#[must_use]
pub fn first_of(body: &str, first: &Regex, second: &Regex) -> Option<Ordering> {
    let masked = CommentDetector::mask_code(body);
    let a = first.find(&masked)?.start();
    let b = second.find(&masked)?.start();
    Some(a.cmp(&b))
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
