pub mod check;
pub mod init;
pub mod rules;

pub use check::{run_check, run_check_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use rules::{format_rule_list, run_rules, run_rules_impl};

use std::path::Path;

use crate::Result;
use crate::config::{Config, ConfigLoader, FileConfigLoader};

/// Resolve the configuration for a command.
///
/// `--no-config` wins over everything, then an explicit `-c` path, then
/// discovery from `root`.
///
/// # Errors
/// Returns an error if the chosen file cannot be read, parsed or validated.
pub fn load_config(root: &Path, explicit: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        tracing::debug!("--no-config given, using defaults");
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    match explicit {
        Some(path) => loader.load_from_path(path),
        None => loader.load(root),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
