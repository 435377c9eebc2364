use super::*;

#[test]
fn starts_with_comment_detects_both_styles() {
    assert!(CommentDetector::starts_with_comment("// note"));
    assert!(CommentDetector::starts_with_comment("/* note */"));
    assert!(!CommentDetector::starts_with_comment("*ptr = NULL;"));
    assert!(!CommentDetector::starts_with_comment("x = 1; // trailing"));
}

#[test]
fn scan_line_plain_code() {
    let scan = CommentDetector::scan_line("int x = 1;", false);
    assert!(scan.has_code);
    assert!(!scan.ends_in_block);
}

#[test]
fn scan_line_trailing_block_opens_state() {
    let scan = CommentDetector::scan_line("x = 1; /* starts here", false);
    assert!(scan.has_code);
    assert!(scan.ends_in_block);
}

#[test]
fn scan_line_closed_block_comment_is_not_code() {
    let scan = CommentDetector::scan_line("  /* only a comment */  ", false);
    assert!(!scan.has_code);
    assert!(!scan.ends_in_block);
}

#[test]
fn scan_line_continuation_closes_block() {
    let scan = CommentDetector::scan_line(" * still comment */ call();", true);
    assert!(scan.has_code);
    assert!(!scan.ends_in_block);
}

#[test]
fn scan_line_ignores_markers_in_strings() {
    let scan = CommentDetector::scan_line(r#"url = "http://example.com/*";"#, false);
    assert!(scan.has_code);
    assert!(!scan.ends_in_block);
}

#[test]
fn scan_line_handles_escaped_quote() {
    let scan = CommentDetector::scan_line(r#"s = "a\"/*b";"#, false);
    assert!(!scan.ends_in_block);
}

#[test]
fn mask_code_preserves_length_and_newlines() {
    let text = "int a; // hi\n/* x\ny */ int b = '{';\n";
    let masked = CommentDetector::mask_code(text);
    assert_eq!(masked.len(), text.len());
    assert_eq!(masked.matches('\n').count(), text.matches('\n').count());
}

#[test]
fn mask_code_blanks_comments_and_literals() {
    let text = "f(\"{\"); // }\n/* { */ g('}');";
    let masked = CommentDetector::mask_code(text);
    assert!(!masked.contains('{'));
    assert!(!masked.contains('}'));
    assert!(masked.contains("f(\" \");"));
    assert!(masked.contains("g(' ');"));
}

#[test]
fn mask_code_keeps_multibyte_offsets() {
    let text = "s = \"héllo\"; x = 1;";
    let masked = CommentDetector::mask_code(text);
    assert_eq!(masked.len(), text.len());
    assert_eq!(masked.find("x = 1"), text.find("x = 1"));
}

#[test]
fn mask_code_line_comment_ends_at_newline() {
    let masked = CommentDetector::mask_code("// a { \nint b {");
    assert!(masked.ends_with("int b {"));
}
