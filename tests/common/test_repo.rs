//! TestRepo builder for integration testing
//!
//! Creates a throwaway source tree, runs the `tsdocgen` binary inside it and
//! hands back its output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

use super::assertions::assert_valid_json;

/// Builder for creating test source trees
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty test repository with an empty `tsdocgen.toml`
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        repo.add_file("tsdocgen.toml", "");
        repo
    }

    /// Get the path to the test repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file in the repository
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Add a source file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Replace the repository's configuration file
    pub fn with_config(&self, content: &str) -> &Self {
        self.add_file("tsdocgen.toml", content)
    }

    /// Run the tsdocgen CLI in the repository and return its output.
    ///
    /// The repository's own `tsdocgen.toml` is always used, so the
    /// developer's configuration never leaks into a test.
    pub fn run_cli(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(env!("CARGO_BIN_EXE_tsdocgen"))
            .current_dir(self.path())
            .env("TSDOCGEN_CONFIG", self.file_path("tsdocgen.toml"))
            .env_remove("RUST_LOG")
            .args(args)
            .output()
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return (exit code, stderr)
    pub fn run_cli_failure(&self, args: &[&str]) -> (Option<i32>, String) {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            !output.status.success(),
            "CLI command {:?} should have failed",
            args
        );
        (
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    /// Run `generate` with JSON output and return the parsed records
    pub fn generate_json(&self, args: &[&str]) -> Vec<Value> {
        let mut full = vec!["generate"];
        full.extend_from_slice(args);
        let output = self.run_cli_success(&full);
        match assert_valid_json(&output, "generate") {
            Value::Array(entries) => entries,
            other => panic!("Expected a JSON array, got {}", other),
        }
    }

    // ========================================================================
    // SOURCE BUILDERS
    // ========================================================================

    /// Add a TypeScript file with a simple documented function
    pub fn add_ts_function(&self, relative_path: &str, fn_name: &str, body: &str) -> &Self {
        let content = format!(
            r#"/** Documentation for {name} */
export function {name}(): void {{
    {body}
}}
"#,
            name = fn_name,
            body = body
        );
        self.add_file(relative_path, &content)
    }

    /// Add a TypeScript file with a class and a constructor
    pub fn add_ts_class(&self, relative_path: &str, class_name: &str) -> &Self {
        let content = format!(
            r#"/** The {name} class */
export class {name} {{
    /** Create a {name} */
    constructor(id: number) {{}}
}}
"#,
            name = class_name
        );
        self.add_file(relative_path, &content)
    }

    // ========================================================================
    // PRE-BUILT REPO STRUCTURES
    // ========================================================================

    /// A small library whose entry point imports two helpers
    pub fn with_import_graph(&self) -> &Self {
        self.add_file(
            "src/index.ts",
            r#"import { format } from "./util/format";
import { Store } from "./store";

/** Entry point */
export function main(): void {
    new Store().save(format("x"));
}
"#,
        )
        .add_file(
            "src/util/format.ts",
            r#"/** Format a value */
export function format(value: string): string {
    return value.trim();
}
"#,
        )
        .add_file(
            "src/store.ts",
            r#"/** Saves things */
export class Store {
    save(value: string): void {}
}
"#,
        )
    }

    /// Every top-level construct the extractor has to step over
    pub fn with_mixed_declarations(&self) -> &Self {
        self.add_file(
            "src/mixed.ts",
            r#"import { readFileSync } from "fs";

export interface Options {
    verbose: boolean;
}

export type Name = string;

declare function ambient(x: number): void;

/** Runs the job */
export function run(options: Options): boolean {
    return options.verbose;
}

export const answer = 42;

/** Worker */
export class Worker {}
"#,
        )
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
