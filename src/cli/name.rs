//! Name command.

use crate::core::naming::StoreIdentifier;
use crate::error::Result;

/// Print the vault name derived from a store identifier.
///
/// Plain output for scripting. A fresh random suffix is drawn per call.
pub fn execute(store: &str) -> Result<()> {
    let store: StoreIdentifier = store.parse()?;
    println!("{}", store.vault_name());
    Ok(())
}
