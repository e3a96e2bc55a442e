//! Common test utilities and fixtures for tsdocgen integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating source trees in a temp directory
//! - Custom assertions for validating CLI output and documentation records

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod test_repo;

pub use assertions::*;
pub use test_repo::TestRepo;
