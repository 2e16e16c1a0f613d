//! Wiring shared by commands that talk to Azure.
//!
//! Settings are read before `az` is located so a missing variable is
//! reported even on machines without the CLI.

use crate::core::az::{AzCli, AzSecrets, AzVaultControl};
use crate::core::config::Settings;
use crate::core::domain::VaultEndpoint;
use crate::core::secrets::SecretStore;
use crate::core::vault::VaultManager;
use crate::error::Result;

/// Signed-in `az` handle plus the settings it was built from.
pub struct Session {
    pub settings: Settings,
    pub cli: AzCli,
}

impl Session {
    /// Read settings, locate `az` and sign in.
    pub fn connect() -> Result<Self> {
        let settings = Settings::from_env()?;
        let cli = AzCli::locate()?;
        cli.login(&settings)?;
        Ok(Self { settings, cli })
    }

    pub fn vaults(&self) -> VaultManager<AzVaultControl> {
        VaultManager::new(AzVaultControl::new(self.cli.clone()))
    }

    /// Open the secret store of a vault given by name or URI.
    pub fn secrets(&self, vault: &str) -> Result<SecretStore<AzSecrets>> {
        let endpoint: VaultEndpoint = vault.parse()?;
        SecretStore::open(AzSecrets::new(self.cli.clone(), endpoint))
    }

    /// Resource group to use, falling back to the configured default.
    pub fn group<'a>(&'a self, group: Option<&'a str>) -> &'a str {
        group.unwrap_or(&self.settings.default_group)
    }
}
