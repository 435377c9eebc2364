#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the fitness-guard binary.
#[macro_export]
macro_rules! fitness_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fitness-guard"))
    };
}

/// A throwaway C project tree.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file, and its parent directories, under the fixture root.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".fitness-guard.toml", content);
    }

    /// The `GameEvent` enum with values `EVT_A`, `EVT_B`, `EVT_C` (line 6).
    pub fn create_events_header(&self) {
        self.create_file("include/events.h", EVENTS_HEADER);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub const EVENTS_HEADER: &str = "\
#ifndef EVENTS_H
#define EVENTS_H
typedef enum {
    EVT_A,
    EVT_B,
    EVT_C
} GameEvent;
#endif
";

/// Enum coverage over `trigger_event`'s second argument.
pub const ENUM_COVERAGE_CONFIG: &str = r#"
[[rules]]
id = "FF-001"
name = "Every event is triggered"
kind = "enum-coverage"
enum_name = "GameEvent"
function = "trigger_event"
argument = 1
files = ["src/**/*.c"]
fix = "Trigger the event where it happens"
"#;

/// Bans raw allocation outside exception-marked lines.
pub const FORBIDDEN_CONFIG: &str = r#"
[[rules]]
id = "FF-003"
name = "No raw allocation"
kind = "forbidden"
patterns = [{ regex = '\bmalloc\s*\(', message = "raw malloc, use the arena" }]
"#;
