//! Command helper methods for Test.

use super::{Test, AZURE_ENV};
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create an azurify command with a clean environment.
    ///
    /// Every `AZURE_*` variable of the outer environment is removed so
    /// developer credentials never leak into a test.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("azurify").expect("failed to find azurify binary");
        for (key, _) in AZURE_ENV {
            cmd.env_remove(key);
        }
        cmd.env_remove("AZURIFY_LOG");
        cmd.env_remove("AZURIFY_STORAGE_CONNECTION_STRING");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Command with the fake Azure settings and `bin` first on PATH.
    pub fn azure_cmd(&self, bin: &Path) -> Command {
        let mut cmd = self.cmd();
        cmd.envs(AZURE_ENV.iter().copied());
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{}:{}", bin.display(), path));
        cmd
    }

    /// Shortcut for `azurify name`.
    pub fn name(&self, store: &str) -> Output {
        self.cmd()
            .args(["name", store])
            .output()
            .expect("failed to run azurify name")
    }

    /// Shortcut for `azurify convert` to stdout.
    pub fn convert(&self, input: &str, format: &str) -> Output {
        self.cmd()
            .args(["convert", input, "--format", format])
            .output()
            .expect("failed to run azurify convert")
    }

    /// Shortcut for `azurify convert -o`.
    pub fn convert_to_file(&self, input: &str, format: &str, out: &str) -> Output {
        self.cmd()
            .args(["convert", input, "--format", format, "-o", out])
            .output()
            .expect("failed to run azurify convert -o")
    }
}
