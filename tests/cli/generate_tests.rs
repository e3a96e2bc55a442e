//! Tests for the `generate` CLI command
//!
//! - `generate PATH...` - Document files and directories
//! - `--out FILE` - Write the records to a file
//! - `--strict`, `--allow-js`, `--no-resolve`, `--project` - Compiler options
//! - `--class-fallback`, `--no-file-names` - Extraction settings

#![allow(unused_imports)]

use std::fs;

use crate::common::{
    assert_contains, assert_entry_exists, assert_entry_not_exists, assert_keys,
    assert_valid_json, entry_names, TestRepo,
};

// ============================================================================
// BASIC GENERATION
// ============================================================================

#[test]
fn test_generate_single_function() {
    let repo = TestRepo::new();
    repo.add_file(
        "src/greet.ts",
        r#"/**
 * Greets someone.
 * @param name Who to greet
 */
export function greet(name: string): string {
    return "hello " + name;
}
"#,
    );

    let entries = repo.generate_json(&["src/greet.ts"]);
    assert_eq!(entries.len(), 1);

    let greet = &entries[0];
    assert_keys(
        greet,
        &[
            "name",
            "fileName",
            "documentation",
            "type",
            "constructors",
            "parameters",
            "returnType",
        ],
    );
    assert_eq!(greet["name"], "greet");
    assert_eq!(greet["fileName"], "src/greet.ts");
    assert_eq!(greet["documentation"], "Greets someone.");
    assert_eq!(greet["type"], "(name: string) => string");
    assert_eq!(greet["returnType"], "string");

    let param = &greet["parameters"][0];
    assert_keys(param, &["name", "documentation", "type"]);
    assert_eq!(param["name"], "name");
    assert_eq!(param["documentation"], "Who to greet");
    assert_eq!(param["type"], "string");
}

#[test]
fn test_generate_class_constructors() {
    let repo = TestRepo::new();
    repo.add_ts_class("src/account.ts", "Account");

    let entries = repo.generate_json(&["src/account.ts"]);
    let account = assert_entry_exists(&entries, "Account");

    assert_keys(
        account,
        &["name", "fileName", "documentation", "type", "constructors"],
    );
    assert_eq!(account["type"], "typeof Account");
    assert_eq!(account["documentation"], "The Account class");

    let constructors = account["constructors"].as_array().unwrap();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0]["returnType"], "Account");
    assert_eq!(constructors[0]["documentation"], "Create a Account");
    assert_eq!(constructors[0]["parameters"][0]["name"], "id");
    assert_eq!(constructors[0]["parameters"][0]["type"], "number");
}

#[test]
fn test_generate_skips_non_documented_constructs() {
    let repo = TestRepo::new();
    repo.with_mixed_declarations();

    let entries = repo.generate_json(&["src/mixed.ts"]);
    assert_eq!(entry_names(&entries), vec!["run", "Worker"]);
    assert_entry_not_exists(&entries, "Options");
    assert_entry_not_exists(&entries, "ambient");
}

#[test]
fn test_generate_directory_input() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/b.ts", "beta", "return;")
        .add_ts_function("src/a.ts", "alpha", "return;")
        .add_file("src/notes.md", "# not source\n");

    let entries = repo.generate_json(&["src"]);
    assert_eq!(entry_names(&entries), vec!["alpha", "beta"]);
    assert_eq!(entries[0]["documentation"], "Documentation for alpha");
}

#[test]
fn test_generate_empty_file_is_empty_array() {
    let repo = TestRepo::new();
    repo.add_file("src/empty.ts", "");

    let output = repo.run_cli_success(&["generate", "src/empty.ts"]);
    assert_eq!(output.trim(), "[]");
}

// ============================================================================
// PROGRAM CONSTRUCTION
// ============================================================================

#[test]
fn test_generate_follows_relative_imports() {
    let repo = TestRepo::new();
    repo.with_import_graph();

    let entries = repo.generate_json(&["src/index.ts"]);
    assert_eq!(entry_names(&entries), vec!["format", "Store", "main"]);
    assert!(entries[0]["fileName"]
        .as_str()
        .unwrap()
        .ends_with("format.ts"));
}

#[test]
fn test_generate_no_resolve() {
    let repo = TestRepo::new();
    repo.with_import_graph();

    let entries = repo.generate_json(&["src/index.ts", "--no-resolve"]);
    assert_eq!(entry_names(&entries), vec!["main"]);
}

#[test]
fn test_generate_shared_dependency_once() {
    let repo = TestRepo::new();
    repo.with_import_graph();

    // index.ts and format.ts both reach format.ts
    let entries = repo.generate_json(&["src/index.ts", "src/util/format.ts"]);
    let formats = entry_names(&entries)
        .into_iter()
        .filter(|n| n == "format")
        .count();
    assert_eq!(formats, 1);
}

#[test]
fn test_generate_javascript_requires_allow_js() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/main.ts", "main", "return;")
        .add_file(
            "src/legacy.js",
            "/** Old helper */\nfunction legacy(a) { return a; }\n",
        );

    let entries = repo.generate_json(&["src"]);
    assert_eq!(entry_names(&entries), vec!["main"]);

    let entries = repo.generate_json(&["src", "--allow-js"]);
    assert_eq!(entry_names(&entries), vec!["legacy", "main"]);
    let legacy = assert_entry_exists(&entries, "legacy");
    assert_eq!(legacy["type"], "(a: any) => any");
}

#[test]
fn test_generate_declaration_files_not_documented() {
    let repo = TestRepo::new();
    repo.add_file("src/types.d.ts", "declare function external(): void;\nexport declare class Remote {}\n")
        .add_ts_function("src/main.ts", "main", "return;");

    let entries = repo.generate_json(&["src"]);
    assert_eq!(entry_names(&entries), vec!["main"]);
}

// ============================================================================
// COMPILER OPTIONS
// ============================================================================

#[test]
fn test_generate_strict_optional_parameters() {
    let repo = TestRepo::new();
    repo.add_file(
        "src/opt.ts",
        "export function pad(text: string, width?: number): string { return text; }\n",
    );

    let loose = repo.generate_json(&["src/opt.ts"]);
    assert_eq!(loose[0]["type"], "(text: string, width?: number) => string");

    let strict = repo.generate_json(&["src/opt.ts", "--strict"]);
    assert_eq!(
        strict[0]["type"],
        "(text: string, width?: number | undefined) => string"
    );
    assert_eq!(strict[0]["parameters"][1]["type"], "number | undefined");
}

#[test]
fn test_generate_project_tsconfig() {
    let repo = TestRepo::new();
    repo.add_file(
        "tsconfig.json",
        r#"{
  // JSON5: comments and trailing commas
  "compilerOptions": {
    "strict": true,
    "allowJs": true,
  },
}
"#,
    )
    .add_file(
        "src/opt.ts",
        "export function pad(width?: number): void {}\n",
    )
    .add_file("src/util.js", "function util() {}\n");

    let entries = repo.generate_json(&["src", "--project", "tsconfig.json"]);
    assert_eq!(entry_names(&entries), vec!["pad", "util"]);
    assert_eq!(entries[0]["type"], "(width?: number | undefined) => void");
}

// ============================================================================
// EXTRACTION SETTINGS
// ============================================================================

#[test]
fn test_generate_no_file_names() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/main.ts", "main", "return;");

    let entries = repo.generate_json(&["src/main.ts", "--no-file-names"]);
    assert!(entries[0].get("fileName").is_none());
}

#[test]
fn test_generate_config_file_settings() {
    let repo = TestRepo::new();
    repo.with_config(
        r#"[compiler]
strict = true

[extraction]
include_file_names = false
"#,
    )
    .add_file("src/opt.ts", "export function f(x?: string): void {}\n");

    let entries = repo.generate_json(&["src/opt.ts"]);
    assert!(entries[0].get("fileName").is_none());
    assert_eq!(entries[0]["type"], "(x?: string | undefined) => void");
}

// ============================================================================
// OUTPUT
// ============================================================================

#[test]
fn test_generate_out_file() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/main.ts", "main", "return;");

    let stdout = repo.run_cli_success(&["generate", "src/main.ts", "--out", "docs/api.json"]);
    assert!(stdout.is_empty());

    let written = fs::read_to_string(repo.file_path("docs/api.json")).unwrap();
    let json = assert_valid_json(&written, "out file");
    assert_eq!(json[0]["name"], "main");
}

#[test]
fn test_generate_text_format() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/main.ts", "main", "return;")
        .add_ts_class("src/user.ts", "User");

    let output = repo.run_cli_success(&["-f", "text", "generate", "src"]);
    assert_contains(&output, "function main (src/main.ts)");
    assert_contains(&output, "class User (src/user.ts)");
    assert_contains(&output, "  | Documentation for main");
    assert_contains(&output, "  (id: number) => User");
}

#[test]
fn test_generate_alias() {
    let repo = TestRepo::new();
    repo.add_ts_function("src/main.ts", "main", "return;");

    let output = repo.run_cli_success(&["g", "src/main.ts"]);
    assert_contains(&output, "\"name\": \"main\"");
}
