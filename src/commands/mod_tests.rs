use tempfile::TempDir;

use super::*;
use crate::config::LOCAL_CONFIG_NAME;

const ONE_RULE: &str = r#"
[[rules]]
id = "FF-003"
name = "No raw malloc"
kind = "forbidden"
patterns = [{ regex = '\bmalloc\(', message = "raw malloc" }]
"#;

#[test]
fn no_config_ignores_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(LOCAL_CONFIG_NAME), ONE_RULE).unwrap();

    let config = load_config(dir.path(), None, true).unwrap();
    assert!(config.rules.is_empty());
}

#[test]
fn discovers_local_file_in_root() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(LOCAL_CONFIG_NAME), ONE_RULE).unwrap();

    let config = load_config(dir.path(), None, false).unwrap();
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].id, "FF-003");
}

#[test]
fn explicit_path_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, ONE_RULE).unwrap();

    let config = load_config(Path::new("."), Some(&path), false).unwrap();
    assert_eq!(config.rules.len(), 1);
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_config(dir.path(), Some(&dir.path().join("nope.toml")), false);
    assert!(result.is_err());
}
