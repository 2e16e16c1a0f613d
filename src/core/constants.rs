//! Constants used throughout azurify.
//!
//! Centralizes magic strings and naming rules.

/// Prefix of every derived vault name.
pub const VAULT_PREFIX: &str = "kv-";

/// Length of every derived vault name.
pub const VAULT_NAME_LEN: usize = 24;

/// Longest base name that still gets a random suffix.
pub const MAX_BASE_LEN: usize = 20;

/// Characters taken from an overlong base name. One more than
/// [`MAX_BASE_LEN`]; existing vaults were provisioned with this slice.
pub const OVERLONG_SLICE_LEN: usize = 21;

/// Second segment of a store identifier.
pub const SHOP_SEGMENT: &str = "myshopify";

/// Third segment of a store identifier.
pub const TLD_SEGMENT: &str = "com";

/// DNS suffix of Key Vault data-plane endpoints.
pub const VAULT_DNS_SUFFIX: &str = ".vault.azure.net";

/// Longest secret name Key Vault accepts.
pub const MAX_SECRET_NAME_LEN: usize = 127;

/// Permissions granted to the configured principal on new vaults.
pub const SECRET_PERMISSIONS: &[&str] = &["get", "list", "set", "delete", "purge"];

/// Key Vault pricing tier used on creation.
pub const VAULT_SKU: &str = "standard";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "AZURIFY_LOG";
