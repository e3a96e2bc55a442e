//! CLI command integration tests
//!
//! Runs the `tsdocgen` binary against temp source trees and checks its
//! output for both subcommands and both output formats.

pub mod config_tests;
pub mod generate_tests;
