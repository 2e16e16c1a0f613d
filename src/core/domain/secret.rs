//! Secret types.
//!
//! `SecretKey` is the closed set of secret names azurify understands;
//! `Secret` is a single name/value entry read from or written to a vault.

use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Recognized secret keys.
///
/// Only these keys are written through when loading a secrets document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SecretKey {
    ShopDomain,
    ApiVersion,
    ApiAccessToken,
    ApiClientSecretKey,
    StorageConnectionString,
}

impl SecretKey {
    /// Every recognized key.
    pub const ALL: [SecretKey; 5] = [
        SecretKey::ShopDomain,
        SecretKey::ApiVersion,
        SecretKey::ApiAccessToken,
        SecretKey::ApiClientSecretKey,
        SecretKey::StorageConnectionString,
    ];

    /// Name under which the secret is stored in the vault.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShopDomain => "SHOPDOMAIN",
            Self::ApiVersion => "APIVERSION",
            Self::ApiAccessToken => "APIACCESSTOKEN",
            Self::ApiClientSecretKey => "APICLIENTSECRETKEY",
            Self::StorageConnectionString => "AZSTORAGECONNSTR",
        }
    }

    /// Look up a recognized key by its stored name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl FromStr for SecretKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognized secret key: {}", s))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret name with its plaintext value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    name: String,
    value: Zeroizing<String>,
}

impl Secret {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Recognized key for this secret, if any.
    pub fn key(&self) -> Option<SecretKey> {
        SecretKey::parse(&self.name)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
