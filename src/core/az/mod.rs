//! Azure CLI driver.
//!
//! Production implementations of the vault, secret and blob service traits.
//! Every call shells out to `az` with JSON output, the same way the other
//! cloud backends drive their vendor CLIs.
//!
//! ## Requirements
//!
//! - `az` CLI must be installed and on `PATH`
//! - A service principal with rights on the subscription
//!   (see [`crate::core::config::Settings`])

use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use crate::core::config::Settings;
use crate::error::{ConfigError, Error, Result};

mod blob;
mod secrets;
mod vault;

pub use blob::AzBlobService;
pub use secrets::AzSecrets;
pub use vault::AzVaultControl;

/// Handle on the local `az` executable.
#[derive(Debug, Clone)]
pub struct AzCli {
    program: PathBuf,
}

impl AzCli {
    /// Locate `az` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AzNotInstalled` if it cannot be found.
    pub fn locate() -> Result<Self> {
        let program = which::which("az").map_err(|_| ConfigError::AzNotInstalled)?;
        debug!(program = %program.display(), "using az CLI");
        Ok(Self { program })
    }

    /// Use a specific `az` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Sign in as the configured service principal and select the
    /// configured subscription.
    ///
    /// # Errors
    ///
    /// Returns `Error::Auth` if the provider rejects the credentials.
    pub fn login(&self, settings: &Settings) -> Result<()> {
        debug!(
            client_id = %settings.client_id,
            tenant_id = %settings.tenant_id,
            "signing in as service principal"
        );

        self.run(&[
            "login",
            "--service-principal",
            "--username",
            settings.client_id.as_str(),
            "--password",
            settings.client_secret.as_str(),
            "--tenant",
            settings.tenant_id.as_str(),
        ])
        .map_err(|f| Error::Auth(f.message))?;

        self.run(&[
            "account",
            "set",
            "--subscription",
            settings.subscription_id.as_str(),
        ])
        .map_err(|f| Error::Auth(f.message))?;

        Ok(())
    }

    /// Run `az` and return its stdout.
    pub(crate) fn run(&self, args: &[&str]) -> std::result::Result<Vec<u8>, Failure> {
        self.run_with_env(args, &[])
    }

    /// Run `az` with extra environment variables for the child only.
    pub(crate) fn run_with_env(
        &self,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> std::result::Result<Vec<u8>, Failure> {
        // argv may carry credentials, log the subcommand only
        trace!(command = %args.iter().take(3).copied().collect::<Vec<_>>().join(" "), "running az");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .args(["--only-show-errors", "--output", "json"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in envs {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| Failure {
            kind: FailureKind::Rejected,
            message: format!("failed to spawn az: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Failure::classify(stderr.trim()));
        }

        Ok(output.stdout)
    }

    /// Run `az` and parse its JSON output.
    pub(crate) fn json<T: DeserializeOwned>(
        &self,
        args: &[&str],
    ) -> std::result::Result<T, Failure> {
        self.json_with_env(args, &[])
    }

    pub(crate) fn json_with_env<T: DeserializeOwned>(
        &self,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> std::result::Result<T, Failure> {
        let stdout = self.run_with_env(args, envs)?;
        serde_json::from_slice(&stdout).map_err(|e| Failure {
            kind: FailureKind::Rejected,
            message: format!("unexpected az output: {}", e),
        })
    }
}

/// How a failed `az` call should surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Auth,
    NotFound,
    Rejected,
}

/// A failed `az` call with its classified cause.
#[derive(Debug, Clone)]
pub(crate) struct Failure {
    pub(crate) kind: FailureKind,
    pub(crate) message: String,
}

const AUTH_MARKERS: &[&str] = &[
    "AuthorizationFailed",
    "AuthenticationFailed",
    "InvalidAuthenticationToken",
    "Forbidden",
    "AADSTS",
    "az login",
    "Unauthorized",
];

const NOT_FOUND_MARKERS: &[&str] = &[
    "ResourceNotFound",
    "ResourceGroupNotFound",
    "SecretNotFound",
    "VaultNotFound",
    "NotFound",
    "was not found",
    "could not be found",
    "does not exist",
];

impl Failure {
    /// Classify a failure from the CLI's error output.
    pub(crate) fn classify(stderr: &str) -> Self {
        let kind = if AUTH_MARKERS.iter().any(|m| stderr.contains(m)) {
            FailureKind::Auth
        } else if NOT_FOUND_MARKERS.iter().any(|m| stderr.contains(m)) {
            FailureKind::NotFound
        } else {
            FailureKind::Rejected
        };

        Self {
            kind,
            message: stderr.to_string(),
        }
    }

    /// Convert into a crate error for a read. Auth failures become
    /// `Error::Auth`; the other kinds go through the given constructors.
    pub(crate) fn into_error<N, R>(self, not_found: N, rejected: R) -> Error
    where
        N: FnOnce(String) -> Error,
        R: FnOnce(String) -> Error,
    {
        match self.kind {
            FailureKind::Auth => Error::Auth(self.message),
            FailureKind::NotFound => not_found(self.message),
            FailureKind::Rejected => rejected(self.message),
        }
    }

    /// Convert into the error of a write or provisioning operation.
    /// Every kind, auth included, goes through `rejected`, so a permission
    /// denial on a write surfaces as that operation's failure.
    pub(crate) fn into_rejection<R>(self, rejected: R) -> Error
    where
        R: FnOnce(String) -> Error,
    {
        rejected(self.message)
    }
}
