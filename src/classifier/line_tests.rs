use super::*;

fn classify_text(text: &str) -> Vec<LineClass> {
    LineClassifier::default().classify_lines(text.lines())
}

#[test]
fn classifies_basic_kinds() {
    let classes = classify_text("int x;\n\n// note\n/* block */\n");
    assert_eq!(
        classes,
        vec![
            LineClass::Code,
            LineClass::Blank,
            LineClass::Comment,
            LineClass::Comment
        ]
    );
}

#[test]
fn multi_line_comment_continuation_is_comment() {
    let text = "/*\n malloc(n * sizeof(char));\n*/\nmalloc(n * sizeof(char));";
    let classes = classify_text(text);
    assert_eq!(classes[1], LineClass::Comment);
    assert_eq!(classes[2], LineClass::Comment);
    assert_eq!(classes[3], LineClass::Code);
}

#[test]
fn block_opened_after_code_makes_following_lines_comments() {
    let classes = classify_text("int a; /* begin\nstill comment\nend */\nint b;");
    assert_eq!(
        classes,
        vec![
            LineClass::Code,
            LineClass::Comment,
            LineClass::Comment,
            LineClass::Code
        ]
    );
}

#[test]
fn pointer_dereference_is_code_not_comment() {
    let classes = classify_text("*ptr = NULL;");
    assert_eq!(classes, vec![LineClass::Code]);
}

#[test]
fn exception_marker_on_same_line() {
    let classes = classify_text("char* s = malloc(8); // EXCEPTION: FFI buffer");
    assert_eq!(classes, vec![LineClass::ExceptionMarked]);
}

#[test]
fn exception_marker_on_previous_line() {
    let classes = classify_text("// EXCEPTION: SDL wants raw memory\nchar* s = malloc(8);\nchar* t = malloc(8);");
    assert_eq!(classes[0], LineClass::Comment);
    assert_eq!(classes[1], LineClass::ExceptionMarked);
    assert_eq!(classes[2], LineClass::Code);
}

#[test]
fn exception_marker_skips_blank_lines() {
    let classes = classify_text("/* FFI: handed to C library */\n\n   \nbuf = calloc(n, 1);");
    assert_eq!(classes[3], LineClass::ExceptionMarked);
}

#[test]
fn custom_markers_replace_defaults() {
    let classifier = LineClassifier::new(vec!["ALLOW-RAW".to_string()]);
    let classes = classifier.classify_lines("x = malloc(1); // EXCEPTION: nope\ny = malloc(1); // ALLOW-RAW".lines());
    assert_eq!(classes, vec![LineClass::Code, LineClass::ExceptionMarked]);
}

#[test]
fn classify_threads_caller_state() {
    let classifier = LineClassifier::default();
    let mut state = BlockState::new();
    assert_eq!(
        classifier.classify("/* open", None, &mut state),
        LineClass::Comment
    );
    assert!(state.in_block());
    assert_eq!(
        classifier.classify("inside", Some("/* open"), &mut state),
        LineClass::Comment
    );
    assert_eq!(
        classifier.classify("close */", Some("inside"), &mut state),
        LineClass::Comment
    );
    assert!(!state.in_block());
}

#[test]
fn line_class_predicates() {
    assert!(LineClass::Code.is_code());
    assert!(!LineClass::ExceptionMarked.is_code());
    assert!(LineClass::ExceptionMarked.is_executable());
    assert!(!LineClass::Comment.is_executable());
}
