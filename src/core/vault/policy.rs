//! Vault creation document.
//!
//! Serialized with the provider's camelCase field names so the same value
//! can be logged, compared in tests, or sent as a request body.

use serde::{Deserialize, Serialize};

use crate::core::constants::{SECRET_PERMISSIONS, VAULT_SKU};

/// Full create-or-update request for one vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSpec {
    pub name: String,
    #[serde(skip)]
    pub group: String,
    pub location: String,
    pub properties: VaultProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    pub tenant_id: String,
    pub sku: Sku,
    pub access_policies: Vec<AccessPolicy>,
    pub enabled_for_deployment: bool,
    pub enabled_for_disk_encryption: bool,
    pub enabled_for_template_deployment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub family: String,
    pub name: String,
}

/// Permissions granted to one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    pub tenant_id: String,
    pub object_id: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub secrets: Vec<String>,
}

impl VaultSpec {
    /// Standard-tier vault granting `principal_id` get/list/set/delete/purge
    /// on secrets, with deployment integrations enabled.
    pub fn new(name: &str, group: &str, location: &str, tenant_id: &str, principal_id: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            location: location.to_string(),
            properties: VaultProperties {
                tenant_id: tenant_id.to_string(),
                sku: Sku {
                    family: "A".to_string(),
                    name: VAULT_SKU.to_string(),
                },
                access_policies: vec![AccessPolicy {
                    tenant_id: tenant_id.to_string(),
                    object_id: principal_id.to_string(),
                    permissions: Permissions {
                        secrets: SECRET_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
                    },
                }],
                enabled_for_deployment: true,
                enabled_for_disk_encryption: true,
                enabled_for_template_deployment: true,
            },
        }
    }

    /// Principal of the first access policy.
    pub fn principal_id(&self) -> &str {
        self.properties
            .access_policies
            .first()
            .map(|p| p.object_id.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_document_shape() {
        let spec = VaultSpec::new("kv-shop", "rg", "westeurope", "t-1", "o-1");
        let doc = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            doc,
            json!({
                "name": "kv-shop",
                "location": "westeurope",
                "properties": {
                    "tenantId": "t-1",
                    "sku": {"family": "A", "name": "standard"},
                    "accessPolicies": [{
                        "tenantId": "t-1",
                        "objectId": "o-1",
                        "permissions": {"secrets": ["get", "list", "set", "delete", "purge"]}
                    }],
                    "enabledForDeployment": true,
                    "enabledForDiskEncryption": true,
                    "enabledForTemplateDeployment": true
                }
            })
        );
        assert_eq!(spec.principal_id(), "o-1");
    }
}
