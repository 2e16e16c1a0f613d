//! Process configuration.
//!
//! All Azure settings come from the environment and are read once at
//! startup into a [`Settings`] value that is passed to each component.

use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{ConfigError, Result};

pub const SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const TENANT_ID: &str = "AZURE_TENANT_ID";
pub const CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const DEFAULT_GROUP_NAME: &str = "AZURE_DEFAULT_GROUP_NAME";
pub const DEFAULT_LOCATION: &str = "AZURE_DEFAULT_LOCATION";
pub const DEFAULT_OBJECT_ID: &str = "AZURE_DEFAULT_OBJECT_ID";

/// Every variable that must be present at startup.
pub const REQUIRED_VARS: &[&str] = &[
    SUBSCRIPTION_ID,
    TENANT_ID,
    CLIENT_ID,
    CLIENT_SECRET,
    DEFAULT_GROUP_NAME,
    DEFAULT_LOCATION,
    DEFAULT_OBJECT_ID,
];

/// Azure settings shared by all components.
#[derive(Clone)]
pub struct Settings {
    pub subscription_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    /// Resource group used when none is given.
    pub default_group: String,
    /// Region used when none is given.
    pub default_location: String,
    /// Principal (object id) granted access on new vaults.
    pub default_principal_id: String,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent or empty
    /// variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::Missing(name).into()),
            }
        };

        let settings = Self {
            subscription_id: require(SUBSCRIPTION_ID)?,
            tenant_id: require(TENANT_ID)?,
            client_id: require(CLIENT_ID)?,
            client_secret: Zeroizing::new(require(CLIENT_SECRET)?),
            default_group: require(DEFAULT_GROUP_NAME)?,
            default_location: require(DEFAULT_LOCATION)?,
            default_principal_id: require(DEFAULT_OBJECT_ID)?,
        };

        debug!(
            subscription = %settings.subscription_id,
            group = %settings.default_group,
            location = %settings.default_location,
            "settings loaded"
        );

        Ok(settings)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("default_group", &self.default_group)
            .field("default_location", &self.default_location)
            .field("default_principal_id", &self.default_principal_id)
            .finish()
    }
}
