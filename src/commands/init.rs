use std::fs;

use crate::cli::InitArgs;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, FitnessGuardError, Result};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes the starter configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(FitnessGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# fitness-guard configuration file

[scanner]
# Source roots relative to the scan root, each with the extensions collected from it
roots = [
    { dir = "src", extensions = ["c", "h"] },
    { dir = "include", extensions = ["h"] },
]

# Directory names skipped anywhere below a root
exclude_dirs = ["external", "vendor", "third_party"]

# Extra glob exclusions, relative to the scan root
# exclude = ["src/generated/**"]

# follow_links = false

[classifier]
# A line containing one of these, or directly following one, is exempt from rules
exception_markers = ["// EXCEPTION:", "/* EXCEPTION:", "// FFI:", "/* FFI:"]

[engine]
# parallel = false
# timeout_ms = 5000

# Every rule has: id, name, kind, and optionally description, severity
# (fail | warn | info), on_missing (skip | info | warn | fail), files (globs)
# and fix.

[[rules]]
id = "FF-100"
name = "No gets()"
kind = "forbidden"
fix = "Use fgets() with an explicit buffer size"
patterns = [{ regex = '\bgets\s*\(', message = "gets() cannot be used safely" }]

# [[rules]]
# id = "FF-001"
# name = "Every event is triggered"
# kind = "enum-coverage"
# enum_name = "GameEvent"
# function = "trigger_event"
# argument = 1
# files = ["src/**/*.c"]

# [[rules]]
# id = "FF-002"
# name = "Modifiers applied before payout"
# kind = "window"
# anchor = 'gold\s*\+='
# required = 'apply_modifiers\('
# before = 30
# after = 0

# [[rules]]
# id = "FF-015"
# name = "Destructor shape"
# kind = "function-body"
# function = "game_destroy"
# on_missing = "warn"
# requires = [
#     { name = "null-check", pattern = 'if\s*\(\s*!\s*g\s*\)' },
#     { name = "free-self", pattern = '\bfree\(\s*g\s*\)' },
# ]

# [[rules]]
# id = "FF-005"
# name = "Choice options are typed"
# kind = "struct-field"
# struct_name = "PendingChoice"
# field = "options"
# field_type = "ChoiceOption*"

# [[rules]]
# id = "FF-014"
# name = "Audio init has a shutdown"
# kind = "paired-calls"
# pairs = [{ open = "audio_init", close = "audio_shutdown" }]
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
