use super::*;

fn parse(toml_str: &str) -> Config {
    toml::from_str(toml_str).unwrap()
}

#[test]
fn default_config_is_valid() {
    assert!(validate_config(&Config::default()).is_ok());
}

#[test]
fn duplicate_rule_ids_are_rejected() {
    let config = parse(
        r#"
[[rules]]
id = "FF-001"
name = "a"
kind = "forbidden"
patterns = [{ regex = "gets\\(", message = "gets" }]

[[rules]]
id = "FF-001"
name = "b"
kind = "forbidden"
patterns = [{ regex = "strcpy\\(", message = "strcpy" }]
"#,
    );
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("duplicate rule id 'FF-001'"));
}

#[test]
fn empty_forbidden_pattern_list_is_rejected() {
    let config = parse(
        r#"
[[rules]]
id = "E"
name = "empty"
kind = "forbidden"
patterns = []
"#,
    );
    assert!(validate_config(&config).is_err());
}

#[test]
fn order_must_reference_known_requirement() {
    let config = parse(
        r#"
[[rules]]
id = "FB"
name = "body"
kind = "function-body"
function = "DestroyFoo"
order = [["free", "nullify"]]
requires = [{ name = "free", pattern = "free\\(" }]
"#,
    );
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("nullify"));
}

#[test]
fn invalid_scope_glob_is_reported() {
    let config = parse(
        r#"
[[rules]]
id = "G"
name = "bad glob"
kind = "paired-calls"
files = ["src/[*.c"]
pairs = [{ open = "InitDeck", close = "CleanupDeck" }]
"#,
    );
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, FitnessGuardError::InvalidPattern { .. }));
}

#[test]
fn invalid_scanner_exclude_is_reported() {
    let mut config = Config::default();
    config.scanner.exclude.push("[".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn root_without_extensions_is_rejected() {
    let mut config = Config::default();
    config.scanner.roots[0].extensions.clear();
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("scanner.roots[0]"));
}
