/// C comment and string delimiters.
pub const LINE_COMMENT: &str = "//";
pub const BLOCK_COMMENT_START: &str = "/*";
pub const BLOCK_COMMENT_END: &str = "*/";

/// Lexical state while walking C-like text byte by byte.
///
/// All delimiters are ASCII, so byte-wise scanning never splits a UTF-8
/// sequence: continuation bytes can't match any delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    LineComment,
    BlockComment,
    /// Inside a string or char literal opened by the given quote.
    Literal(u8),
}

/// Outcome of scanning a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineScan {
    /// The line leaves an unterminated `/*` open.
    pub ends_in_block: bool,
    /// Some non-whitespace byte of the line sits outside comments.
    pub has_code: bool,
}

/// Comment detection for C-like sources, aware of string and char literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentDetector;

impl CommentDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// True when the trimmed line opens with `//` or `/*`.
    #[must_use]
    pub fn starts_with_comment(trimmed: &str) -> bool {
        trimmed.starts_with(LINE_COMMENT) || trimmed.starts_with(BLOCK_COMMENT_START)
    }

    /// Scan one line given whether a block comment was open before it.
    ///
    /// Literals do not continue across lines; an unterminated quote ends at EOL.
    #[must_use]
    pub fn scan_line(line: &str, in_block: bool) -> LineScan {
        let bytes = line.as_bytes();
        let mut state = if in_block { Lex::BlockComment } else { Lex::Code };
        let mut has_code = false;
        let mut i = 0;

        while i < bytes.len() {
            let (next_state, consumed) = step(state, bytes, i);
            if state == Lex::Code && next_state != Lex::LineComment && next_state != Lex::BlockComment
            {
                has_code |= !bytes[i].is_ascii_whitespace();
            }
            if next_state == Lex::LineComment {
                return LineScan {
                    ends_in_block: false,
                    has_code,
                };
            }
            state = next_state;
            i += consumed;
        }

        LineScan {
            ends_in_block: state == Lex::BlockComment,
            has_code,
        }
    }

    /// Blank out comments and literal contents, keeping byte offsets and newlines.
    ///
    /// Quote delimiters stay in place so `f("x")` still reads as a call with one
    /// argument. Every other byte inside a comment or literal becomes a space,
    /// which lets brace counting and header regexes run on the result and map
    /// offsets straight back to the original text.
    #[must_use]
    pub fn mask_code(text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut state = Lex::Code;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'\n' {
                out.push(b'\n');
                if state != Lex::BlockComment {
                    state = Lex::Code;
                }
                i += 1;
                continue;
            }

            let (next_state, consumed) = step(state, bytes, i);
            let keep = matches!(
                (state, next_state),
                (Lex::Code, Lex::Code | Lex::Literal(_)) | (Lex::Literal(_), Lex::Code)
            );
            for offset in 0..consumed {
                let byte = bytes[i + offset];
                out.push(if keep || byte == b'\n' { byte } else { b' ' });
            }
            state = next_state;
            i += consumed;
        }

        String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}

/// Advance the lexer by one token starting at `i`. Returns the new state and
/// how many bytes were consumed (always at least one).
fn step(state: Lex, bytes: &[u8], i: usize) -> (Lex, usize) {
    let b = bytes[i];
    let next = bytes.get(i + 1).copied();

    match state {
        Lex::Code => match (b, next) {
            (b'/', Some(b'/')) => (Lex::LineComment, 2),
            (b'/', Some(b'*')) => (Lex::BlockComment, 2),
            (b'"' | b'\'', _) => (Lex::Literal(b), 1),
            _ => (Lex::Code, 1),
        },
        Lex::LineComment => (Lex::LineComment, 1),
        Lex::BlockComment => match (b, next) {
            (b'*', Some(b'/')) => (Lex::Code, 2),
            _ => (Lex::BlockComment, 1),
        },
        Lex::Literal(quote) => {
            if b == b'\\' && next.is_some_and(|n| n != b'\n') {
                (state, 2)
            } else if b == quote {
                (Lex::Code, 1)
            } else {
                (state, 1)
            }
        }
    }
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
