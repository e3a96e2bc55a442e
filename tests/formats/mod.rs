//! Output format consistency tests
