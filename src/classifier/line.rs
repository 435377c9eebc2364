use serde::Serialize;

use crate::config::ClassifierConfig;

use super::CommentDetector;

/// Classification of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    Comment,
    Blank,
    ExceptionMarked,
    Code,
}

impl LineClass {
    /// Only `Code` lines may produce violations.
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::Code)
    }

    /// Code that exists in the program, excused or not.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Code | Self::ExceptionMarked)
    }
}

/// Block-comment state threaded by the caller across a file's lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockState {
    in_block: bool,
}

impl BlockState {
    #[must_use]
    pub const fn new() -> Self {
        Self { in_block: false }
    }

    #[must_use]
    pub const fn in_block(self) -> bool {
        self.in_block
    }
}

/// Decides comment / blank / exception-marked / code per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassifier {
    markers: Vec<String>,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl LineClassifier {
    #[must_use]
    pub const fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.exception_markers.clone())
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Classify `line`. `previous` is the closest preceding non-blank line.
    ///
    /// A line continuing a block comment opened earlier is a comment even when
    /// code follows the closing `*/`.
    pub fn classify(&self, line: &str, previous: Option<&str>, state: &mut BlockState) -> LineClass {
        let started_in_block = state.in_block;
        let scan = CommentDetector::scan_line(line, started_in_block);
        state.in_block = scan.ends_in_block;

        if started_in_block {
            return LineClass::Comment;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineClass::Blank;
        }

        if CommentDetector::starts_with_comment(trimmed) {
            return LineClass::Comment;
        }

        if self.is_exception(line, previous) {
            return LineClass::ExceptionMarked;
        }

        LineClass::Code
    }

    /// True when `line` or `previous` carries an exception marker.
    #[must_use]
    pub fn is_exception(&self, line: &str, previous: Option<&str>) -> bool {
        self.markers.iter().any(|marker| {
            line.contains(marker.as_str()) || previous.is_some_and(|p| p.contains(marker.as_str()))
        })
    }

    /// Classify every line of a file, threading block state and the previous
    /// non-blank line.
    pub fn classify_lines<'a, I>(&self, lines: I) -> Vec<LineClass>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = BlockState::new();
        let mut previous: Option<&str> = None;
        let mut classes = Vec::new();

        for line in lines {
            classes.push(self.classify(line, previous, &mut state));
            if !line.trim().is_empty() {
                previous = Some(line);
            }
        }

        classes
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
