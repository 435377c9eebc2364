use std::collections::HashMap;

use super::*;

#[derive(Default)]
struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    config_dir: Option<PathBuf>,
}

impl MockFileSystem {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    fn with_config_dir(mut self, dir: &str) -> Self {
        self.config_dir = Some(PathBuf::from(dir));
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }
}

const LOCAL_CONFIG: &str = r#"
[classifier]
exception_markers = ["// ALLOW:"]
"#;

const USER_CONFIG: &str = r#"
[engine]
parallel = true
"#;

#[test]
fn load_returns_default_when_no_config_exists() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::default());
    let config = loader.load(Path::new("/project")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_prefers_root_config() {
    let fs = MockFileSystem::default()
        .with_file("/project/.fitness-guard.toml", LOCAL_CONFIG)
        .with_file("/home/user/.config/fitness-guard/config.toml", USER_CONFIG)
        .with_config_dir("/home/user/.config/fitness-guard");
    let loader = FileConfigLoader::with_fs(fs);

    let config = loader.load(Path::new("/project")).unwrap();
    assert_eq!(config.classifier.exception_markers, vec!["// ALLOW:"]);
    assert!(!config.engine.parallel);
}

#[test]
fn load_falls_back_to_user_config() {
    let fs = MockFileSystem::default()
        .with_file("/home/user/.config/fitness-guard/config.toml", USER_CONFIG)
        .with_config_dir("/home/user/.config/fitness-guard");
    let loader = FileConfigLoader::with_fs(fs);

    let config = loader.load(Path::new("/project")).unwrap();
    assert!(config.engine.parallel);
}

#[test]
fn load_from_path_reports_missing_file() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::default());
    let err = loader
        .load_from_path(Path::new("/nowhere/custom.toml"))
        .unwrap_err();
    assert!(matches!(err, FitnessGuardError::FileRead { .. }));
}

#[test]
fn load_from_path_rejects_malformed_toml() {
    let fs = MockFileSystem::default().with_file("/p/bad.toml", "[[rules]\nid =");
    let loader = FileConfigLoader::with_fs(fs);
    let err = loader.load_from_path(Path::new("/p/bad.toml")).unwrap_err();
    assert!(matches!(err, FitnessGuardError::TomlParse(_)));
}

#[test]
fn load_from_path_runs_validation() {
    let content = r#"
[[rules]]
id = "FF-003"
name = "bad regex"
kind = "forbidden"
patterns = [{ regex = "malloc(", message = "m" }]
"#;
    let fs = MockFileSystem::default().with_file("/p/cfg.toml", content);
    let loader = FileConfigLoader::with_fs(fs);
    let err = loader.load_from_path(Path::new("/p/cfg.toml")).unwrap_err();
    assert!(matches!(err, FitnessGuardError::InvalidRegex { .. }));
}
