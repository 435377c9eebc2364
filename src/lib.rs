pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod output;
pub mod path_utils;
pub mod rule;
pub mod scanner;

pub use error::{FitnessGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RULES_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
