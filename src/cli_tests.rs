use std::path::PathBuf;

use super::*;

#[test]
fn cli_check_default_root() {
    let cli = Cli::parse_from(["fitness-guard", "check"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.root, PathBuf::from("."));
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.rules.is_empty());
            assert!(!args.parallel);
            assert_eq!(args.timeout_ms, None);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_all_options() {
    let cli = Cli::parse_from([
        "fitness-guard",
        "check",
        "game",
        "-c",
        "custom.toml",
        "-f",
        "json",
        "-o",
        "report.json",
        "--rule",
        "FF-001",
        "--rule",
        "FF-015",
        "--parallel",
        "--timeout-ms",
        "250",
    ]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.root, PathBuf::from("game"));
            assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.output, Some(PathBuf::from("report.json")));
            assert_eq!(args.rules, vec!["FF-001".to_string(), "FF-015".to_string()]);
            assert!(args.parallel);
            assert_eq!(args.timeout_ms, Some(250));
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_rejects_unknown_format() {
    let result = Cli::try_parse_from(["fitness-guard", "check", "-f", "sarif"]);
    assert!(result.is_err());
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "fitness-guard",
        "check",
        "-vv",
        "--quiet",
        "--color",
        "never",
        "--no-config",
    ]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert!(matches!(cli.color, ColorChoice::Never));
    assert!(cli.no_config);
}

#[test]
fn cli_rules_with_config() {
    let cli = Cli::parse_from(["fitness-guard", "rules", "-c", "x.toml"]);
    match cli.command {
        Commands::Rules(args) => {
            assert_eq!(args.config, Some(PathBuf::from("x.toml")));
            assert_eq!(args.root, PathBuf::from("."));
        }
        _ => panic!("Expected Rules command"),
    }
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["fitness-guard", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from(".fitness-guard.toml"));
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn color_choice_converts_to_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Never), ColorMode::Never);
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["fitness-guard"]).is_err());
}
