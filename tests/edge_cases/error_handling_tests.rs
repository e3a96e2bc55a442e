//! Error handling and unusual inputs
//!
//! Exit codes: 1 missing input, 2 unsupported language, 3 program failure,
//! 5 configuration or output error.

use crate::common::{assert_contains, entry_names, TestRepo};

#[test]
fn test_missing_input_exit_code() {
    let repo = TestRepo::new();

    let (code, stderr) = repo.run_cli_failure(&["generate", "src/missing.ts"]);
    assert_eq!(code, Some(1));
    assert_contains(&stderr, "File not found");
}

#[test]
fn test_unsupported_extension_exit_code() {
    let repo = TestRepo::new();
    repo.add_file("notes.txt", "plain text");

    let (code, stderr) = repo.run_cli_failure(&["generate", "notes.txt"]);
    assert_eq!(code, Some(2));
    assert_contains(&stderr, "Unsupported language");
}

#[test]
fn test_only_javascript_without_allow_js() {
    let repo = TestRepo::new();
    repo.add_file("lib.js", "function f() {}\n");

    let (code, stderr) = repo.run_cli_failure(&["generate", "lib.js"]);
    assert_eq!(code, Some(3));
    assert_contains(&stderr, "no input files");
}

#[test]
fn test_empty_directory() {
    let repo = TestRepo::new();
    std::fs::create_dir_all(repo.file_path("empty")).unwrap();

    let (code, _) = repo.run_cli_failure(&["generate", "empty"]);
    assert_eq!(code, Some(3));
}

#[test]
fn test_missing_config_file() {
    let repo = TestRepo::new();
    repo.add_ts_function("main.ts", "main", "return;");

    let (code, stderr) =
        repo.run_cli_failure(&["--config", "nowhere.toml", "generate", "main.ts"]);
    assert_eq!(code, Some(1));
    assert_contains(&stderr, "nowhere.toml");
}

#[test]
fn test_syntax_errors_do_not_abort() {
    let repo = TestRepo::new();
    repo.add_file(
        "broken.ts",
        "export function ok(): number { return 1; }\nfunction (\n",
    );

    let entries = repo.generate_json(&["broken.ts"]);
    assert_eq!(entry_names(&entries)[0], "ok");
}

#[test]
fn test_import_cycle_terminates() {
    let repo = TestRepo::new();
    repo.add_file(
        "a.ts",
        "import { b } from \"./b\";\nexport function a(): void { b(); }\n",
    )
    .add_file(
        "b.ts",
        "import { a } from \"./a\";\nexport function b(): void { a(); }\n",
    );

    let entries = repo.generate_json(&["a.ts"]);
    assert_eq!(entry_names(&entries), vec!["b", "a"]);
}

#[test]
fn test_unresolvable_import_is_ignored() {
    let repo = TestRepo::new();
    repo.add_file(
        "main.ts",
        "import { gone } from \"./gone\";\nimport * as path from \"path\";\nexport function main(): void {}\n",
    );

    let entries = repo.generate_json(&["main.ts"]);
    assert_eq!(entry_names(&entries), vec!["main"]);
}

#[test]
fn test_unwritable_out_path() {
    let repo = TestRepo::new();
    repo.add_ts_function("main.ts", "main", "return;")
        .add_file("blocker", "a file, not a directory");

    let (code, stderr) =
        repo.run_cli_failure(&["generate", "main.ts", "--out", "blocker/out.json"]);
    assert_eq!(code, Some(5));
    assert_contains(&stderr, "Failed to write output");
}
