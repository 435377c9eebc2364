use super::*;

fn classifier() -> LineClassifier {
    LineClassifier::default()
}

#[test]
fn parses_plain_fields() {
    let inner = "\n    int id;\n    const char *label;\n    Card cards[MAX_CARDS];\n";
    let fields = parse_fields(inner, 10, &classifier());

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].ty, "int");
    assert_eq!(fields[0].line, 11);
    assert_eq!(fields[1].name, "label");
    assert_eq!(fields[1].ty, "const char *");
    assert_eq!(fields[2].name, "cards");
    assert_eq!(fields[2].array.as_deref(), Some("[MAX_CARDS]"));
    assert_eq!(fields[2].line, 13);
}

#[test]
fn skips_comments_and_strips_trailing_comments() {
    let inner = "\n  // int ghost;\n  /* int ghost2;\n     int ghost3; */\n  int real; // trailing\n";
    let fields = parse_fields(inner, 1, &classifier());

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "real");
    assert_eq!(fields[0].declaration, "int real;");
}

#[test]
fn omits_unparseable_declarations() {
    let inner = "\n  void (*callback)(int);\n  int a, b;\n  unsigned flag : 1;\n  struct {\n    int nested;\n  } anon;\n  float ok;\n";
    let fields = parse_fields(inner, 1, &classifier());

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["ok"]);
}

#[test]
fn several_declarations_on_one_line_are_parsed_separately() {
    let inner = "\n    int count; dArray_t* choices;\n    int a, b; float ok;\n";
    let fields = parse_fields(inner, 1, &classifier());

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["count", "choices", "ok"]);
    assert_eq!(fields[0].ty, "int");
    assert_eq!(fields[1].ty, "dArray_t*");
    assert!(fields[1].type_matches("dArray_t*"));
    assert_eq!(fields[1].declaration, "dArray_t* choices;");
    assert_eq!(fields[1].line, 2);
    assert_eq!(fields[2].line, 3);
}

#[test]
fn exception_marked_lines_still_declare_fields() {
    let inner = "\n    // EXCEPTION: owned by SDL\n    void *surface;\n    int w;\n";
    let fields = parse_fields(inner, 1, &classifier());

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["surface", "w"]);
}

#[test]
fn pointer_type_matches_ignoring_whitespace() {
    let fields = parse_fields("\n  ChoiceOption* options;\n", 1, &classifier());
    assert!(fields[0].type_matches("ChoiceOption *"));
    assert!(fields[0].type_matches("ChoiceOption*"));
    assert!(!fields[0].type_matches("ChoiceOption"));
}

#[test]
fn parses_enum_values_with_lines() {
    let inner = "\n    EVENT_A,\n    EVENT_B = 5,\n    // EVENT_COMMENTED,\n    EVENT_C\n";
    let values = parse_enum_values(inner, 20, &classifier());

    let names: Vec<&str> = values.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["EVENT_A", "EVENT_B", "EVENT_C"]);
    assert_eq!(values["EVENT_A"], 21);
    assert_eq!(values["EVENT_C"], 24);
}

#[test]
fn parses_single_line_enum() {
    let values = parse_enum_values(" RED, GREEN = (1 << 2), BLUE ", 3, &classifier());
    let names: Vec<&str> = values.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    assert!(values.values().all(|&line| line == 3));
}

#[test]
fn duplicate_enum_value_keeps_first_line() {
    let values = parse_enum_values("\nA,\nA,\n", 1, &classifier());
    assert_eq!(values.len(), 1);
    assert_eq!(values["A"], 2);
}

#[test]
fn identifier_check() {
    assert!(is_identifier("EVENT_1"));
    assert!(is_identifier("_x"));
    assert!(!is_identifier("1abc"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("a-b"));
}
