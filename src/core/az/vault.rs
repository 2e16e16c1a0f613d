//! Vault control through `az group` and `az keyvault`.

use serde::Deserialize;
use tracing::debug;

use super::{AzCli, FailureKind};
use crate::core::constants::VAULT_DNS_SUFFIX;
use crate::core::domain::{VaultInfo, VaultState};
use crate::core::vault::{VaultControl, VaultSpec};
use crate::error::{Error, Result, VaultError};

/// Vault control plane backed by the `az` CLI.
#[derive(Debug, Clone)]
pub struct AzVaultControl {
    cli: AzCli,
}

impl AzVaultControl {
    pub fn new(cli: AzCli) -> Self {
        Self { cli }
    }

    fn bool_arg(value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}

/// Subset of `az keyvault show` output.
#[derive(Debug, Deserialize)]
struct VaultResource {
    name: String,
    location: String,
    #[serde(default)]
    properties: Option<VaultResourceProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaultResourceProperties {
    vault_uri: Option<String>,
    provisioning_state: Option<String>,
}

impl From<VaultResource> for VaultInfo {
    fn from(resource: VaultResource) -> Self {
        let properties = resource.properties;
        let uri = properties
            .as_ref()
            .and_then(|p| p.vault_uri.clone())
            .unwrap_or_else(|| format!("https://{}{}/", resource.name, VAULT_DNS_SUFFIX));
        let state = properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
            .map(VaultState::from_provisioning_state)
            .unwrap_or(VaultState::Active);

        Self {
            name: resource.name,
            location: resource.location,
            uri,
            state,
        }
    }
}

impl VaultControl for AzVaultControl {
    fn ensure_group(&self, group: &str, location: &str) -> Result<()> {
        debug!(group = %group, location = %location, "ensuring resource group");
        self.cli
            .run(&["group", "create", "--name", group, "--location", location])
            .map_err(|f| f.into_rejection(|m| VaultError::Provision(m).into()))?;
        Ok(())
    }

    fn create_or_update(&self, spec: &VaultSpec) -> Result<VaultInfo> {
        let props = &spec.properties;
        let flags = [
            "--enabled-for-deployment",
            Self::bool_arg(props.enabled_for_deployment),
            "--enabled-for-disk-encryption",
            Self::bool_arg(props.enabled_for_disk_encryption),
            "--enabled-for-template-deployment",
            Self::bool_arg(props.enabled_for_template_deployment),
        ];

        let exists = match self.get(&spec.group, &spec.name) {
            Ok(_) => true,
            Err(Error::Vault(VaultError::NotFound(_))) => false,
            Err(Error::Auth(reason)) => return Err(VaultError::Provision(reason).into()),
            Err(e) => return Err(e),
        };

        let mut args = vec!["keyvault"];
        if exists {
            debug!(vault = %spec.name, "vault exists, updating");
            args.extend([
                "update",
                "--name",
                spec.name.as_str(),
                "--resource-group",
                spec.group.as_str(),
            ]);
        } else {
            debug!(vault = %spec.name, "creating vault");
            args.extend([
                "create",
                "--name",
                spec.name.as_str(),
                "--resource-group",
                spec.group.as_str(),
                "--location",
                spec.location.as_str(),
                "--sku",
                props.sku.name.as_str(),
                "--enable-rbac-authorization",
                "false",
            ]);
        }
        args.extend(flags);

        self.cli
            .run(&args)
            .map_err(|f| f.into_rejection(|m| VaultError::Provision(m).into()))?;

        for policy in &props.access_policies {
            let mut args = vec![
                "keyvault",
                "set-policy",
                "--name",
                spec.name.as_str(),
                "--resource-group",
                spec.group.as_str(),
                "--object-id",
                policy.object_id.as_str(),
                "--secret-permissions",
            ];
            args.extend(policy.permissions.secrets.iter().map(String::as_str));

            self.cli
            .run(&args)
            .map_err(|f| f.into_rejection(|m| VaultError::Provision(m).into()))?;
        }

        self.get(&spec.group, &spec.name)
    }

    fn get(&self, group: &str, name: &str) -> Result<VaultInfo> {
        let resource: VaultResource = self
            .cli
            .json(&["keyvault", "show", "--name", name, "--resource-group", group])
            .map_err(|f| {
                f.into_error(
                    |_| VaultError::NotFound(name.to_string()).into(),
                    |m| VaultError::Request(m).into(),
                )
            })?;
        Ok(resource.into())
    }

    fn delete(&self, group: &str, name: &str) -> Result<()> {
        self.cli
            .run(&["keyvault", "delete", "--name", name, "--resource-group", group])
            .map_err(|f| {
                f.into_error(
                    |_| VaultError::NotFound(name.to_string()).into(),
                    |m| VaultError::Request(m).into(),
                )
            })?;
        Ok(())
    }

    fn list(&self, group: &str) -> Result<Vec<VaultInfo>> {
        let resources: Vec<VaultResource> = self
            .cli
            .json(&["keyvault", "list", "--resource-group", group])
            .map_err(|f| {
                f.into_error(
                    |m| VaultError::NotFound(m).into(),
                    |m| VaultError::Request(m).into(),
                )
            })?;
        Ok(resources.into_iter().map(VaultInfo::from).collect())
    }

    fn is_deleted(&self, name: &str) -> Result<bool> {
        match self.cli.run(&["keyvault", "show-deleted", "--name", name]) {
            Ok(_) => Ok(true),
            Err(f) if f.kind == FailureKind::NotFound => Ok(false),
            Err(f) => Err(f.into_error(
                |m| VaultError::NotFound(m).into(),
                |m| VaultError::Request(m).into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_resource_to_info() {
        let resource: VaultResource = serde_json::from_str(
            r#"{
                "name": "kv-shop",
                "location": "westeurope",
                "properties": {
                    "vaultUri": "https://kv-shop.vault.azure.net/",
                    "provisioningState": "Succeeded"
                }
            }"#,
        )
        .unwrap();
        let info = VaultInfo::from(resource);
        assert_eq!(info.name, "kv-shop");
        assert_eq!(info.uri, "https://kv-shop.vault.azure.net/");
        assert_eq!(info.state, VaultState::Active);
    }

    #[test]
    fn test_vault_resource_without_properties() {
        let resource: VaultResource =
            serde_json::from_str(r#"{"name": "kv-shop", "location": "westeurope"}"#).unwrap();
        let info = VaultInfo::from(resource);
        assert_eq!(info.uri, "https://kv-shop.vault.azure.net/");
    }
}
