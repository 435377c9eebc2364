use std::ffi::OsStr;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{FitnessGuardError, Result};

/// Decides which walked entries become part of the corpus.
///
/// Paths handed to a filter are relative to the scan root.
pub trait FileFilter {
    fn should_include(&self, relative: &Path) -> bool;

    /// Whether the walker should enter a directory with this name.
    fn should_descend(&self, _dir_name: &OsStr) -> bool {
        true
    }
}

/// Compile glob patterns into one set.
///
/// # Errors
/// Returns an error if any pattern is invalid.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| FitnessGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| FitnessGuardError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })
}

/// Filter for one source root: extension list, excluded directory names and
/// exclude globs.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    exclude_patterns: GlobSet,
}

impl SourceFilter {
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(
        extensions: Vec<String>,
        exclude_dirs: Vec<String>,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        Ok(Self {
            extensions,
            exclude_dirs,
            exclude_patterns: build_glob_set(exclude_patterns)?,
        })
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn in_excluded_dir(&self, path: &Path) -> bool {
        path.parent().is_some_and(|parent| {
            parent
                .components()
                .any(|c| self.is_excluded_dir_name(c.as_os_str()))
        })
    }

    fn is_excluded_dir_name(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.exclude_dirs.iter().any(|d| d == name))
    }
}

impl FileFilter for SourceFilter {
    fn should_include(&self, relative: &Path) -> bool {
        self.has_valid_extension(relative)
            && !self.in_excluded_dir(relative)
            && !self.exclude_patterns.is_match(relative)
    }

    fn should_descend(&self, dir_name: &OsStr) -> bool {
        !self.is_excluded_dir_name(dir_name)
    }
}

/// The set of files a rule reads, as globs over root-relative paths.
#[derive(Debug, Clone)]
pub struct FileScope {
    patterns: Vec<String>,
    set: GlobSet,
}

impl FileScope {
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: patterns.to_vec(),
            set: build_glob_set(patterns)?,
        })
    }

    /// Scope matching every file.
    #[must_use]
    pub fn all() -> Self {
        let patterns = vec!["**".to_string()];
        let set = build_glob_set(&patterns).unwrap_or_else(|_| GlobSet::empty());
        Self { patterns, set }
    }

    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        self.set.is_match(relative)
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Human-readable form used as the location of corpus-level findings.
    #[must_use]
    pub fn describe(&self) -> String {
        self.patterns.join(", ")
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
