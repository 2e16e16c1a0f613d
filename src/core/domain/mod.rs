//! Domain types.

mod secret;
mod storage_object;
mod vault_info;

pub use secret::{Secret, SecretKey};
pub use storage_object::StorageObject;
pub use vault_info::{VaultEndpoint, VaultInfo, VaultState};
