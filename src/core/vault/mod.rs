//! Key Vault lifecycle.
//!
//! `VaultManager` provisions, describes and deletes vaults through a
//! [`VaultControl`] implementation. Each vault moves through
//! [`VaultState`]: `Absent -> Provisioning -> Active -> Deleted`.

mod policy;

pub use policy::{AccessPolicy, Permissions, Sku, VaultProperties, VaultSpec};

use tracing::{debug, info};

use crate::core::config::Settings;
use crate::core::domain::{VaultInfo, VaultState};
use crate::core::naming::StoreIdentifier;
use crate::error::{Error, Result, VaultError};

/// Vault control-plane operations.
///
/// Implemented by the `az` driver and by the in-memory test double.
pub trait VaultControl {
    /// Create the resource group if it does not exist yet.
    fn ensure_group(&self, group: &str, location: &str) -> Result<()>;

    /// Create or update a vault and wait for completion.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Provision` if the provider rejects the request.
    fn create_or_update(&self, spec: &VaultSpec) -> Result<VaultInfo>;

    /// Fetch vault metadata.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the vault does not exist.
    fn get(&self, group: &str, name: &str) -> Result<VaultInfo>;

    /// Request deletion without waiting for purge.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the vault does not exist.
    fn delete(&self, group: &str, name: &str) -> Result<()>;

    /// All vaults in a resource group.
    fn list(&self, group: &str) -> Result<Vec<VaultInfo>>;

    /// Whether a soft-deleted vault with this name is retained.
    fn is_deleted(&self, name: &str) -> Result<bool>;
}

/// Provisions and inspects vaults.
#[derive(Debug)]
pub struct VaultManager<C> {
    control: C,
}

impl<C: VaultControl> VaultManager<C> {
    pub fn new(control: C) -> Self {
        Self { control }
    }

    /// Underlying control-plane implementation.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Create a vault granting `principal_id` full secret access.
    ///
    /// Ensures the resource group exists first. Create-or-update semantics:
    /// running it against an existing vault reapplies the policy.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Provision` on provider rejection (quota, name
    /// collision, permission). Nothing is retried.
    pub fn create(
        &self,
        name: &str,
        group: &str,
        location: &str,
        tenant_id: &str,
        principal_id: &str,
    ) -> Result<VaultInfo> {
        debug!(vault = %name, group = %group, location = %location, "provisioning vault");

        self.control.ensure_group(group, location)?;

        let spec = VaultSpec::new(name, group, location, tenant_id, principal_id);
        let info = self.control.create_or_update(&spec)?;

        info!(vault = %info.name, uri = %info.uri, "vault provisioned");
        Ok(info)
    }

    /// Create a vault using the configured group, location and principal.
    pub fn create_with_defaults(&self, name: &str, settings: &Settings) -> Result<VaultInfo> {
        self.create(
            name,
            &settings.default_group,
            &settings.default_location,
            &settings.tenant_id,
            &settings.default_principal_id,
        )
    }

    /// Derive a vault name for `store` and provision it with defaults.
    pub fn provision_for_store(
        &self,
        store: &StoreIdentifier,
        settings: &Settings,
    ) -> Result<VaultInfo> {
        let name = store.vault_name();
        debug!(store = %store, vault = %name, "derived vault name");
        self.create_with_defaults(&name, settings)
    }

    /// Request deletion of a vault. Does not wait for purge.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the vault does not exist.
    pub fn delete(&self, name: &str, group: &str) -> Result<()> {
        self.control.delete(group, name)?;
        info!(vault = %name, group = %group, "vault deletion requested");
        Ok(())
    }

    /// Name, location and URI of a vault.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the vault does not exist.
    pub fn describe(&self, name: &str, group: &str) -> Result<VaultInfo> {
        self.control.get(group, name)
    }

    /// All vaults in a resource group.
    pub fn list(&self, group: &str) -> Result<Vec<VaultInfo>> {
        self.control.list(group)
    }

    /// Current lifecycle state of a vault.
    pub fn state(&self, name: &str, group: &str) -> Result<VaultState> {
        match self.control.get(group, name) {
            Ok(info) => Ok(info.state),
            Err(Error::Vault(VaultError::NotFound(_))) => {
                if self.control.is_deleted(name)? {
                    Ok(VaultState::Deleted)
                } else {
                    Ok(VaultState::Absent)
                }
            }
            Err(e) => Err(e),
        }
    }
}
