mod filter;
mod source;

pub use filter::{FileFilter, FileScope, SourceFilter, build_glob_set};
pub use source::{Corpus, SourceFile};

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::ScannerConfig;
use crate::error::{FitnessGuardError, Result};
use crate::path_utils::relative_display;
use crate::rule::Violation;

/// Files found under one directory, plus problems met while walking.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// `(absolute path, root-relative path)` pairs.
    pub files: Vec<(PathBuf, String)>,
    pub warnings: Vec<Violation>,
}

/// Trait for walking a directory and collecting candidate files.
pub trait FileScanner {
    /// Walk `dir`, reporting paths relative to `base`.
    fn scan(&self, dir: &Path, base: &Path) -> ScanOutput;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
    follow_links: bool,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            follow_links: false,
        }
    }

    #[must_use]
    pub const fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// A followed link must resolve inside the scan root.
    fn stays_inside(&self, path: &Path, base: &Path) -> bool {
        if !self.follow_links {
            return true;
        }
        match dunce::canonicalize(path) {
            Ok(resolved) => resolved.starts_with(base),
            Err(_) => false,
        }
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, dir: &Path, base: &Path) -> ScanOutput {
        let mut output = ScanOutput::default();
        let walker = WalkDir::new(dir)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                if e.file_type().is_dir() && !self.filter.should_descend(e.file_name()) {
                    return false;
                }
                if e.path_is_symlink() && !self.stays_inside(e.path(), base) {
                    tracing::debug!(path = %e.path().display(), "Skipping link outside scan root");
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let location = err
                        .path()
                        .and_then(|p| relative_display(p, base))
                        .unwrap_or_else(|| dir.display().to_string());
                    let message = if err.loop_ancestor().is_some() {
                        "symbolic link loop skipped".to_string()
                    } else {
                        format!("cannot walk entry: {err}")
                    };
                    output.warnings.push(Violation::load_warning(location, message));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = relative_display(entry.path(), base) else {
                continue;
            };
            if self.filter.should_include(Path::new(&relative)) {
                output.files.push((entry.into_path(), relative));
            }
        }

        output
    }
}

/// Discovers and reads the source corpus described by a [`ScannerConfig`].
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    config: ScannerConfig,
}

impl CorpusLoader {
    /// # Errors
    /// Returns an error if an exclude pattern is invalid.
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        build_glob_set(&config.exclude)?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Load every matching file under `root`.
    ///
    /// Missing source roots are skipped. Unreadable files become load warnings.
    ///
    /// # Errors
    /// Returns an error if `root` is not a readable directory.
    pub fn load(&self, root: &Path) -> Result<Corpus> {
        if !root.is_dir() {
            return Err(FitnessGuardError::Config(format!(
                "scan root '{}' is not a directory",
                root.display()
            )));
        }
        let base = dunce::canonicalize(root)?;

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();
        for source_root in &self.config.roots {
            let dir = base.join(&source_root.dir);
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "Source root not present, skipping");
                continue;
            }
            let filter = SourceFilter::new(
                source_root.extensions.clone(),
                self.config.exclude_dirs.clone(),
                &self.config.exclude,
            )?;
            let scanner = DirectoryScanner::new(filter).with_follow_links(self.config.follow_links);
            let output = scanner.scan(&dir, &base);
            tracing::debug!(
                dir = %source_root.dir,
                files = output.files.len(),
                "Scanned source root"
            );
            candidates.extend(output.files);
            warnings.extend(output.warnings);
        }

        candidates.sort_by(|a, b| a.1.cmp(&b.1));
        candidates.dedup_by(|a, b| a.1 == b.1);

        let results: Vec<std::result::Result<SourceFile, Violation>> = candidates
            .into_par_iter()
            .map(|(path, relative)| read_source(path, relative))
            .collect();

        let mut files = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(file) => files.push(file),
                Err(warning) => {
                    tracing::warn!(path = %warning.path, "{}", warning.message);
                    warnings.push(warning);
                }
            }
        }

        tracing::info!(files = files.len(), warnings = warnings.len(), "Corpus loaded");
        Ok(Corpus::new(base, files, warnings))
    }
}

fn read_source(path: PathBuf, relative: String) -> std::result::Result<SourceFile, Violation> {
    match std::fs::read(&path) {
        Ok(bytes) => {
            let text = String::from_utf8(bytes)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
            Ok(SourceFile::new(path, relative, text))
        }
        Err(e) => Err(Violation::load_warning(
            relative,
            format!("cannot read file: {e}"),
        )),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
