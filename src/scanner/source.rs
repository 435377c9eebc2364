use std::path::{Path, PathBuf};

use crate::classifier::CommentDetector;
use crate::rule::Violation;

use super::FileScope;

/// One loaded source file. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    relative_path: String,
    text: String,
    /// Byte offset of the start of each line.
    line_starts: Vec<usize>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: PathBuf, relative_path: impl Into<String>, text: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .filter(|&start| start < text.len() || start == 0)
            .collect();
        Self {
            path,
            relative_path: relative_path.into(),
            text,
            line_starts,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the scan root, forward slashes.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.line_starts.len()
        }
    }

    /// 1-indexed line without its terminator.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&str> {
        if number == 0 || number > self.line_count() {
            return None;
        }
        let start = self.line_starts[number - 1];
        let end = self
            .line_starts
            .get(number)
            .map_or(self.text.len(), |next| next - 1);
        Some(
            self.text[start..end]
                .trim_end_matches('\n')
                .trim_end_matches('\r'),
        )
    }

    /// Copy with comments and literal contents blanked. Line numbers and byte
    /// offsets match the original.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self::new(
            self.path.clone(),
            self.relative_path.clone(),
            CommentDetector::mask_code(&self.text),
        )
    }

    /// All lines, numbered from 1.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        (1..=self.line_count()).filter_map(|n| self.line(n).map(|l| (n, l)))
    }

    /// 1-indexed line containing the byte at `offset`.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }
}

/// Every loaded file, sorted by relative path, plus load warnings.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<SourceFile>,
    load_warnings: Vec<Violation>,
}

impl Corpus {
    /// Sorts files by relative path and drops duplicates from overlapping roots.
    #[must_use]
    pub fn new(root: PathBuf, mut files: Vec<SourceFile>, load_warnings: Vec<Violation>) -> Self {
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files.dedup_by(|a, b| a.relative_path == b.relative_path);
        Self {
            root,
            files,
            load_warnings,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    #[must_use]
    pub fn get(&self, relative: &str) -> Option<&SourceFile> {
        self.files
            .binary_search_by(|f| f.relative_path.as_str().cmp(relative))
            .ok()
            .map(|i| &self.files[i])
    }

    /// Files whose relative path matches `scope`, in corpus order.
    pub fn matching<'a>(&'a self, scope: &'a FileScope) -> impl Iterator<Item = &'a SourceFile> {
        self.files
            .iter()
            .filter(move |f| scope.matches(&f.relative_path))
    }

    #[must_use]
    pub fn load_warnings(&self) -> &[Violation] {
        &self.load_warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
