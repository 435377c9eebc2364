use std::path::PathBuf;

use super::*;

fn file(relative: &str, text: &str) -> SourceFile {
    SourceFile::new(PathBuf::from("/p").join(relative), relative, text.to_string())
}

#[test]
fn line_access_is_one_indexed() {
    let f = file("src/a.c", "int a;\nint b;\n");
    assert_eq!(f.line_count(), 2);
    assert_eq!(f.line(1), Some("int a;"));
    assert_eq!(f.line(2), Some("int b;"));
    assert_eq!(f.line(0), None);
    assert_eq!(f.line(3), None);
}

#[test]
fn last_line_without_newline() {
    let f = file("src/a.c", "x\ny");
    assert_eq!(f.line_count(), 2);
    assert_eq!(f.line(2), Some("y"));
}

#[test]
fn crlf_is_stripped() {
    let f = file("src/a.c", "a;\r\nb;\r\n");
    assert_eq!(f.line(1), Some("a;"));
    assert_eq!(f.line(2), Some("b;"));
}

#[test]
fn empty_file_has_no_lines() {
    let f = file("src/empty.c", "");
    assert_eq!(f.line_count(), 0);
    assert_eq!(f.lines().count(), 0);
}

#[test]
fn lines_match_str_lines() {
    let text = "a\n\nb\n  c  \n";
    let f = file("src/a.c", text);
    let ours: Vec<&str> = f.lines().map(|(_, l)| l).collect();
    let std_lines: Vec<&str> = text.lines().collect();
    assert_eq!(ours, std_lines);
}

#[test]
fn line_of_offset_maps_bytes_to_lines() {
    let f = file("src/a.c", "ab\ncd\nef");
    assert_eq!(f.line_of_offset(0), 1);
    assert_eq!(f.line_of_offset(2), 1);
    assert_eq!(f.line_of_offset(3), 2);
    assert_eq!(f.line_of_offset(7), 3);
}

#[test]
fn corpus_sorts_and_dedups() {
    let corpus = Corpus::new(
        PathBuf::from("/p"),
        vec![
            file("src/b.c", "b"),
            file("include/a.h", "a"),
            file("src/b.c", "b"),
        ],
        Vec::new(),
    );
    let names: Vec<&str> = corpus.files().iter().map(SourceFile::relative_path).collect();
    assert_eq!(names, vec!["include/a.h", "src/b.c"]);
    assert_eq!(corpus.len(), 2);
}

#[test]
fn corpus_get_by_relative_path() {
    let corpus = Corpus::new(
        PathBuf::from("/p"),
        vec![file("src/a.c", "A"), file("src/b.c", "B")],
        Vec::new(),
    );
    assert_eq!(corpus.get("src/b.c").map(SourceFile::text), Some("B"));
    assert!(corpus.get("src/c.c").is_none());
}

#[test]
fn corpus_matching_filters_by_scope() {
    let corpus = Corpus::new(
        PathBuf::from("/p"),
        vec![file("src/a.c", ""), file("include/a.h", "")],
        Vec::new(),
    );
    let scope = FileScope::new(&["**/*.h".to_string()]).unwrap();
    let matched: Vec<&str> = corpus.matching(&scope).map(SourceFile::relative_path).collect();
    assert_eq!(matched, vec!["include/a.h"]);
}

#[test]
fn masked_keeps_line_layout() {
    let file = SourceFile::new(
        PathBuf::from("/p/src/a.c"),
        "src/a.c",
        "int n = 4; // malloc(n)\r\ng(\"x\"); /* a\n b */ h();\n".to_string(),
    );
    let masked = file.masked();

    assert_eq!(masked.line_count(), file.line_count());
    assert_eq!(masked.relative_path(), "src/a.c");
    assert_eq!(masked.line(1).map(str::trim_end), Some("int n = 4;"));
    assert_eq!(masked.line(2), Some("g(\" \");     "));
    assert_eq!(masked.line(3), Some("      h();"));
    assert_eq!(masked.text().len(), file.text().len());
}
