//! Tests for the `config` CLI command
//!
//! - `config show` - Print the effective configuration
//! - `config path` - Print the configuration file in use

use crate::common::{assert_contains, assert_valid_json, TestRepo};

#[test]
fn test_config_show_defaults_as_toml() {
    let repo = TestRepo::new();

    let output = repo.run_cli_success(&["-f", "text", "config", "show"]);
    assert_contains(&output, "[compiler]");
    assert_contains(&output, "target = \"ES5\"");
    assert_contains(&output, "class_symbol_policy = \"drop\"");
    assert_contains(&output, "level = \"warn\"");
}

#[test]
fn test_config_show_json() {
    let repo = TestRepo::new();
    repo.with_config("[extraction]\nclass_symbol_policy = \"fallback\"\n");

    let output = repo.run_cli_success(&["config", "show"]);
    let json = assert_valid_json(&output, "config show");
    assert_eq!(json["extraction"]["class_symbol_policy"], "fallback");
    assert_eq!(json["compiler"]["strict"], false);
}

#[test]
fn test_config_path() {
    let repo = TestRepo::new();

    let output = repo.run_cli_success(&["config", "path"]);
    assert_contains(&output, "tsdocgen.toml");
}

#[test]
fn test_config_invalid_file() {
    let repo = TestRepo::new();
    repo.with_config("[compiler\nstrict = ");

    let (code, stderr) = repo.run_cli_failure(&["config", "show"]);
    assert_eq!(code, Some(5));
    assert_contains(&stderr, "Configuration error");
}
