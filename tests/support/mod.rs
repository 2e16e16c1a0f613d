//! Test support utilities for azurify integration tests.
//!
//! Provides an isolated temp directory per test, helpers to run the
//! binary, and a scripted stand-in for the `az` CLI.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fake_az;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// Child processes get `.current_dir()` and an explicit environment, so
/// tests can run in parallel without touching process-global state.
pub struct Test {
    /// Working directory for the test
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Absolute path of a file inside the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the test directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Test directory with the sample records file in place.
    pub fn with_records() -> Self {
        let t = Self::new();
        t.write("records.json", SAMPLE_RECORDS);
        t
    }
}
