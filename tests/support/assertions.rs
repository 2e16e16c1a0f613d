//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert a derived vault name has the expected shape for `base`.
pub fn assert_vault_name(name: &str, base: &str) {
    assert_eq!(name.len(), 24, "vault name {} is not 24 chars", name);
    let prefix = format!("kv-{}-", base);
    assert!(
        name.starts_with(&prefix),
        "vault name {} does not start with {}",
        name,
        prefix
    );
    assert!(
        name[prefix.len()..].chars().all(|c| c.is_ascii_lowercase()),
        "vault name {} has a non-lowercase suffix",
        name
    );
}
