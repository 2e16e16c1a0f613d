//! Secret store through `az keyvault secret`.

use serde::Deserialize;
use std::io::Write;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::AzCli;
use crate::core::domain::VaultEndpoint;
use crate::core::secrets::SecretBackend;
use crate::error::{Result, SecretError};

/// Secrets of one vault, backed by the `az` CLI.
#[derive(Debug, Clone)]
pub struct AzSecrets {
    cli: AzCli,
    endpoint: VaultEndpoint,
}

impl AzSecrets {
    pub fn new(cli: AzCli, endpoint: VaultEndpoint) -> Self {
        Self { cli, endpoint }
    }
}

#[derive(Deserialize)]
struct SecretBundle {
    value: Option<String>,
}

impl SecretBackend for AzSecrets {
    fn endpoint(&self) -> &VaultEndpoint {
        &self.endpoint
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .cli
            .json(&[
                "keyvault",
                "secret",
                "list",
                "--vault-name",
                self.endpoint.name(),
                "--query",
                "[].name",
            ])
            .map_err(|f| {
                f.into_error(
                    |m| SecretError::Request(m).into(),
                    |m| SecretError::Request(m).into(),
                )
            })?;
        debug!(vault = %self.endpoint.name(), count = names.len(), "listed secrets");
        Ok(names)
    }

    fn get(&self, name: &str) -> Result<Zeroizing<String>> {
        trace!(vault = %self.endpoint.name(), secret = %name, "fetching secret");
        let bundle: SecretBundle = self
            .cli
            .json(&[
                "keyvault",
                "secret",
                "show",
                "--vault-name",
                self.endpoint.name(),
                "--name",
                name,
            ])
            .map_err(|f| {
                f.into_error(
                    |_| SecretError::NotFound(name.to_string()).into(),
                    |m| SecretError::Request(m).into(),
                )
            })?;
        let value = bundle
            .value
            .ok_or_else(|| SecretError::Request(format!("secret {} has no value", name)))?;
        Ok(Zeroizing::new(value))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let write_error = |reason: String| SecretError::Write {
            key: name.to_string(),
            reason,
        };

        // pass the value through a file so it never appears in argv
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        let path = file.path().to_string_lossy().to_string();

        self.cli
            .run(&[
                "keyvault",
                "secret",
                "set",
                "--vault-name",
                self.endpoint.name(),
                "--name",
                name,
                "--file",
                &path,
                "--encoding",
                "utf-8",
            ])
            .map_err(|f| f.into_rejection(|m| write_error(m).into()))?;

        debug!(vault = %self.endpoint.name(), secret = %name, "secret written");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.cli
            .run(&[
                "keyvault",
                "secret",
                "delete",
                "--vault-name",
                self.endpoint.name(),
                "--name",
                name,
            ])
            .map_err(|f| {
                f.into_error(
                    |_| SecretError::NotFound(name.to_string()).into(),
                    |m| SecretError::Request(m).into(),
                )
            })?;
        Ok(())
    }

    fn purge(&self, name: &str) -> Result<()> {
        self.cli
            .run(&[
                "keyvault",
                "secret",
                "purge",
                "--vault-name",
                self.endpoint.name(),
                "--name",
                name,
            ])
            .map_err(|f| {
                f.into_error(
                    |_| SecretError::NotFound(name.to_string()).into(),
                    |m| SecretError::Request(m).into(),
                )
            })?;
        Ok(())
    }
}
