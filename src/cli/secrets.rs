//! Secret management commands.
//!
//! Each command opens a fresh snapshot of the vault, so even `get` pays one
//! round trip per stored secret.

use std::path::Path;
use tracing::info;

use crate::cli::output;
use crate::cli::session::Session;
use crate::error::Result;

/// List secret names.
pub fn list(vault: &str, json: bool) -> Result<()> {
    let session = Session::connect()?;
    let store = session.secrets(vault)?;
    let names: Vec<&str> = store.secrets().keys().map(String::as_str).collect();

    if json {
        let result = serde_json::json!({
            "vault": store.endpoint().name(),
            "keys": names,
            "count": names.len()
        });
        println!("{}", result);
    } else if names.is_empty() {
        output::dimmed("no secrets stored");
    } else {
        output::section(&format!("{} secrets in {}", names.len(), store.endpoint().name()));
        for name in names {
            output::list_item(name);
        }
    }
    Ok(())
}

/// Print a secret value.
pub fn get(vault: &str, key: &str) -> Result<()> {
    let session = Session::connect()?;
    let mut store = session.secrets(vault)?;
    let value = store.get(key)?;
    // Plain output for scripting - no decoration
    println!("{}", value.as_str());
    Ok(())
}

/// Create or overwrite a secret.
pub fn set(vault: &str, key: &str, value: &str) -> Result<()> {
    info!("Setting secret {} in {}", key, vault);
    let session = Session::connect()?;
    let mut store = session.secrets(vault)?;
    store.set(key, value)?;
    output::success(&format!("set {}", output::name(key)));
    Ok(())
}

/// Delete a secret, optionally purging it.
pub fn rm(vault: &str, key: &str, purge: bool) -> Result<()> {
    info!("Removing secret {} from {}", key, vault);
    let session = Session::connect()?;
    let mut store = session.secrets(vault)?;
    store.delete(key)?;
    if purge {
        store.purge(key)?;
        output::success(&format!("purged {}", output::name(key)));
    } else {
        output::success(&format!("removed {}", output::name(key)));
    }
    Ok(())
}

/// Load recognized keys from a JSON document.
pub fn load(vault: &str, path: &Path) -> Result<()> {
    let session = Session::connect()?;
    let mut store = session.secrets(vault)?;
    let report = store.load_from_document(path)?;

    output::success(&format!(
        "loaded {} secrets into {}",
        report.written.len(),
        output::name(store.endpoint().name())
    ));
    for key in &report.skipped {
        output::warn(&format!("skipped unrecognized key {}", key));
    }
    if !report.missing.is_empty() {
        let missing: Vec<&str> = report.missing.iter().map(|k| k.as_str()).collect();
        output::dimmed(&format!("not in document: {}", missing.join(", ")));
    }
    Ok(())
}
