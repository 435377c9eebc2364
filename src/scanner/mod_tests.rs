use std::path::Path;

use super::*;
use crate::config::SourceRoot;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn relative_paths(corpus: &Corpus) -> Vec<&str> {
    corpus.files().iter().map(SourceFile::relative_path).collect()
}

#[test]
fn scanner_reports_paths_relative_to_base() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/game/deck.c", "int x;");

    let base = dunce::canonicalize(temp_dir.path()).unwrap();
    let output = DirectoryScanner::new(AcceptAllFilter).scan(&base.join("src"), &base);

    assert_eq!(output.files.len(), 1);
    assert_eq!(output.files[0].1, "src/game/deck.c");
    assert!(output.warnings.is_empty());
}

#[test]
fn loader_uses_default_roots() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/main.c", "int main(void) { return 0; }");
    write(temp_dir.path(), "src/game.h", "");
    write(temp_dir.path(), "include/api.h", "");
    write(temp_dir.path(), "include/api.c", "");
    write(temp_dir.path(), "docs/readme.c", "");

    let loader = CorpusLoader::new(&ScannerConfig::default()).unwrap();
    let corpus = loader.load(temp_dir.path()).unwrap();

    assert_eq!(
        relative_paths(&corpus),
        vec!["include/api.h", "src/game.h", "src/main.c"]
    );
    assert_eq!(
        corpus.get("src/main.c").map(SourceFile::text),
        Some("int main(void) { return 0; }")
    );
}

#[test]
fn loader_skips_excluded_directories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/main.c", "");
    write(temp_dir.path(), "src/external/sdl.c", "");
    write(temp_dir.path(), "src/third_party/lua/lapi.c", "");

    let corpus = CorpusLoader::new(&ScannerConfig::default())
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/main.c"]);
}

#[test]
fn loader_applies_exclude_globs() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/main.c", "");
    write(temp_dir.path(), "src/gen/tables.c", "");

    let config = ScannerConfig {
        exclude: vec!["src/gen/**".to_string()],
        ..ScannerConfig::default()
    };
    let corpus = CorpusLoader::new(&config)
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/main.c"]);
}

#[test]
fn loader_dedups_overlapping_roots() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/a.c", "");
    write(temp_dir.path(), "src/sub/b.c", "");

    let config = ScannerConfig {
        roots: vec![SourceRoot::new("src", &["c"]), SourceRoot::new("src/sub", &["c"])],
        ..ScannerConfig::default()
    };
    let corpus = CorpusLoader::new(&config)
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/a.c", "src/sub/b.c"]);
}

#[test]
fn loader_missing_roots_yield_empty_corpus() {
    let temp_dir = TempDir::new().unwrap();

    let corpus = CorpusLoader::new(&ScannerConfig::default())
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert!(corpus.is_empty());
    assert!(corpus.load_warnings().is_empty());
}

#[test]
fn loader_rejects_missing_scan_root() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let result = CorpusLoader::new(&ScannerConfig::default())
        .unwrap()
        .load(&missing);

    assert!(matches!(result, Err(FitnessGuardError::Config(_))));
}

#[test]
fn loader_decodes_invalid_utf8_lossily() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    std::fs::write(temp_dir.path().join("src/bin.c"), [b'a', 0xFF, b'b']).unwrap();

    let corpus = CorpusLoader::new(&ScannerConfig::default())
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    let text = corpus.get("src/bin.c").unwrap().text();
    assert!(text.starts_with('a'));
    assert!(text.ends_with('b'));
}

#[test]
fn loader_rejects_invalid_exclude_pattern() {
    let config = ScannerConfig {
        exclude: vec!["[bad".to_string()],
        ..ScannerConfig::default()
    };
    assert!(CorpusLoader::new(&config).is_err());
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed_by_default() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/real.c", "");
    std::os::unix::fs::symlink(
        temp_dir.path().join("src/real.c"),
        temp_dir.path().join("src/link.c"),
    )
    .unwrap();

    let corpus = CorpusLoader::new(&ScannerConfig::default())
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/real.c"]);
}

#[cfg(unix)]
#[test]
fn symlink_loop_terminates_when_following() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/a/main.c", "");
    std::os::unix::fs::symlink(
        temp_dir.path().join("src"),
        temp_dir.path().join("src/a/loop"),
    )
    .unwrap();

    let config = ScannerConfig {
        follow_links: true,
        ..ScannerConfig::default()
    };
    let corpus = CorpusLoader::new(&config)
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/a/main.c"]);
    assert!(
        corpus
            .load_warnings()
            .iter()
            .any(|w| w.message.contains("loop"))
    );
}

#[cfg(unix)]
#[test]
fn followed_links_outside_root_are_skipped() {
    let outside = TempDir::new().unwrap();
    write(outside.path(), "secret.c", "");
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/main.c", "");
    std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("src/escape")).unwrap();

    let config = ScannerConfig {
        follow_links: true,
        ..ScannerConfig::default()
    };
    let corpus = CorpusLoader::new(&config)
        .unwrap()
        .load(temp_dir.path())
        .unwrap();

    assert_eq!(relative_paths(&corpus), vec!["src/main.c"]);
}
