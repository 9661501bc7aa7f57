#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

// === Environment ===

#[test]
fn test_empty_environment_gives_defaults() {
    let config = CliConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, CliConfig::default());
    assert_eq!(config.parse_config(), ParseConfig::default());
}

#[test]
fn test_environment_overrides() {
    let config = CliConfig::from_lookup(|name| match name {
        MAX_DEPTH_VAR => Some("64".to_string()),
        MAX_REPETITIONS_VAR => Some(" 1000 ".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.max_depth, Some(64));
    assert_eq!(config.max_repetitions, Some(1000));

    let engine = config.parse_config();
    assert_eq!(engine.max_depth, 64);
    assert_eq!(engine.max_repetitions, Some(1000));
}

#[test]
fn test_invalid_environment_value() {
    let err = CliConfig::from_lookup(|name| (name == MAX_DEPTH_VAR).then(|| "deep".to_string()))
        .unwrap_err();

    assert_eq!(
        err,
        ConfigError::InvalidNumber {
            source_name: MAX_DEPTH_VAR.to_string(),
            value: "deep".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "invalid value `deep` for KNOT_MAX_DEPTH: expected a non-negative integer"
    );
}

// === Arguments ===

#[test]
fn test_args_override_environment() {
    let mut config = CliConfig {
        max_depth: Some(10),
        max_repetitions: None,
    };
    let argv = args(&["--max-depth=20", "1+2", "--max-repetitions=5"]);

    let positional = config.apply_args(&argv).unwrap();
    assert_eq!(positional, vec!["1+2"]);
    assert_eq!(config.max_depth, Some(20));
    assert_eq!(config.max_repetitions, Some(5));
}

#[test]
fn test_single_dash_arguments_are_positional() {
    let mut config = CliConfig::default();
    let argv = args(&["-1, 2", "-x"]);

    assert_eq!(config.apply_args(&argv).unwrap(), vec!["-1, 2", "-x"]);
}

#[test]
fn test_unknown_and_malformed_options() {
    let mut config = CliConfig::default();

    let argv = args(&["--verbose"]);
    assert_eq!(
        config.apply_args(&argv),
        Err(ConfigError::UnknownOption("--verbose".to_string()))
    );

    let argv = args(&["--max-depth=-3"]);
    assert!(matches!(
        config.apply_args(&argv),
        Err(ConfigError::InvalidNumber { .. })
    ));
}
