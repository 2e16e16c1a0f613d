//! Vault metadata, lifecycle state and data-plane endpoint.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::constants::VAULT_DNS_SUFFIX;
use crate::error::VaultError;

/// Lifecycle of a remote vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultState {
    Absent,
    Provisioning,
    Active,
    Deleted,
}

impl VaultState {
    /// Map a provider `provisioningState` onto the lifecycle.
    pub fn from_provisioning_state(state: &str) -> Self {
        match state {
            "Succeeded" => Self::Active,
            _ => Self::Provisioning,
        }
    }
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Provisioning => "provisioning",
            Self::Active => "active",
            Self::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Metadata returned when describing a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultInfo {
    pub name: String,
    pub location: String,
    /// Data-plane URI (`https://<name>.vault.azure.net/`)
    pub uri: String,
    pub state: VaultState,
}

/// Address of a vault's secret store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultEndpoint {
    name: String,
}

impl VaultEndpoint {
    /// Endpoint for a vault name.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Parse a vault URI such as `https://kv-shop.vault.azure.net/`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidEndpoint` if the URI is not a Key Vault
    /// data-plane address.
    pub fn from_url(url: &str) -> Result<Self, VaultError> {
        let host = url
            .strip_prefix("https://")
            .map(|rest| rest.trim_end_matches('/'))
            .ok_or_else(|| VaultError::InvalidEndpoint(url.to_string()))?;

        match host.strip_suffix(VAULT_DNS_SUFFIX) {
            Some(name) if !name.is_empty() && !name.contains(['/', '.']) => {
                Ok(Self::from_name(name))
            }
            _ => Err(VaultError::InvalidEndpoint(url.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> String {
        format!("https://{}{}/", self.name, VAULT_DNS_SUFFIX)
    }
}

impl FromStr for VaultEndpoint {
    type Err = VaultError;

    /// Accepts either a bare vault name or a full vault URI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("https://") {
            Self::from_url(s)
        } else if s.is_empty() {
            Err(VaultError::InvalidEndpoint(s.to_string()))
        } else {
            Ok(Self::from_name(s))
        }
    }
}

impl fmt::Display for VaultEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_roundtrip() {
        let endpoint = VaultEndpoint::from_url("https://kv-langerchen.vault.azure.net/").unwrap();
        assert_eq!(endpoint.name(), "kv-langerchen");
        assert_eq!(endpoint.url(), "https://kv-langerchen.vault.azure.net/");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let endpoint = VaultEndpoint::from_url("https://kv-shop.vault.azure.net").unwrap();
        assert_eq!(endpoint.name(), "kv-shop");
    }

    #[test]
    fn test_endpoint_rejects_other_hosts() {
        assert!(VaultEndpoint::from_url("http://kv-shop.vault.azure.net/").is_err());
        assert!(VaultEndpoint::from_url("https://kv-shop.blob.core.windows.net/").is_err());
        assert!(VaultEndpoint::from_url("https://.vault.azure.net/").is_err());
        assert!(VaultEndpoint::from_url("https://a.b.vault.azure.net/").is_err());
    }

    #[test]
    fn test_endpoint_from_str_accepts_names() {
        let endpoint: VaultEndpoint = "kv-shop".parse().unwrap();
        assert_eq!(endpoint.url(), "https://kv-shop.vault.azure.net/");
        assert!("".parse::<VaultEndpoint>().is_err());
    }

    #[test]
    fn test_provisioning_state_mapping() {
        assert_eq!(
            VaultState::from_provisioning_state("Succeeded"),
            VaultState::Active
        );
        assert_eq!(
            VaultState::from_provisioning_state("RegisteringDns"),
            VaultState::Provisioning
        );
    }
}
