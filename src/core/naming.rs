//! Vault name derivation.
//!
//! A Shopify store identifier (`<name>.myshopify.com`) is validated and
//! turned into a 24-character Key Vault name.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{
    MAX_BASE_LEN, OVERLONG_SLICE_LEN, SHOP_SEGMENT, TLD_SEGMENT, VAULT_PREFIX,
};
use crate::error::NameError;

const LOWERCASE: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Validate a store identifier and return its first segment.
///
/// # Errors
///
/// Returns `NameError::InvalidFormat` unless the identifier has exactly
/// three segments ending in `myshopify.com` and a non-empty first segment.
/// Returns `NameError::InvalidCharacters` if the first segment contains
/// anything other than ASCII letters, digits or `-`.
pub fn validate_store_identifier(id: &str) -> Result<&str, NameError> {
    let segments: Vec<&str> = id.split('.').collect();

    if segments.len() != 3 || segments[1] != SHOP_SEGMENT || segments[2] != TLD_SEGMENT {
        return Err(NameError::InvalidFormat(id.to_string()));
    }

    let base = segments[0];
    if base.is_empty() {
        return Err(NameError::InvalidFormat(id.to_string()));
    }

    if let Some(ch) = base
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return Err(NameError::InvalidCharacters {
            name: base.to_string(),
            ch,
        });
    }

    Ok(base)
}

/// Derive a vault name using the thread-local RNG.
///
/// # Errors
///
/// Propagates validation errors from [`validate_store_identifier`].
pub fn derive_vault_name(id: &str) -> Result<String, NameError> {
    derive_vault_name_with(id, &mut rand::thread_rng())
}

/// Derive a vault name drawing the random suffix from `rng`.
///
/// Bases of up to 20 characters become `kv-<base>-<suffix>` where the
/// suffix pads the name to 24 characters. Longer bases become
/// `kv-<base[0:21]>`.
pub fn derive_vault_name_with<R: Rng + ?Sized>(id: &str, rng: &mut R) -> Result<String, NameError> {
    let base = validate_store_identifier(id)?;
    Ok(name_from_base(base, rng))
}

// base must already be validated (ASCII only)
fn name_from_base<R: Rng + ?Sized>(base: &str, rng: &mut R) -> String {
    if base.len() > MAX_BASE_LEN {
        return format!("{}{}", VAULT_PREFIX, &base[..OVERLONG_SLICE_LEN]);
    }

    let suffix: String = (0..MAX_BASE_LEN - base.len())
        .map(|_| LOWERCASE[rng.gen_range(0..LOWERCASE.len())] as char)
        .collect();

    format!("{}{}-{}", VAULT_PREFIX, base, suffix)
}

/// A validated `<name>.myshopify.com` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreIdentifier(String);

impl StoreIdentifier {
    /// First segment of the identifier.
    pub fn base(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Derive a fresh vault name for this store.
    pub fn vault_name(&self) -> String {
        name_from_base(self.base(), &mut rand::thread_rng())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StoreIdentifier {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_store_identifier(s)?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for StoreIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
