//! Vault commands.

use dialoguer::Confirm;
use tracing::info;

use crate::cli::output;
use crate::cli::session::Session;
use crate::core::domain::VaultInfo;
use crate::core::naming::StoreIdentifier;
use crate::error::Result;

/// Arguments of `vault create`.
pub struct CreateArgs {
    pub name: Option<String>,
    pub store: Option<String>,
    pub group: Option<String>,
    pub location: Option<String>,
    pub principal: Option<String>,
}

/// Create or update a vault.
pub fn create(args: CreateArgs) -> Result<()> {
    // validate the identifier before touching the network
    let name = match args.name {
        Some(name) => name,
        None => args
            .store
            .unwrap_or_default()
            .parse::<StoreIdentifier>()?
            .vault_name(),
    };

    let session = Session::connect()?;
    let settings = &session.settings;
    let group = session.group(args.group.as_deref());
    let location = args
        .location
        .as_deref()
        .unwrap_or(&settings.default_location);
    let principal = args
        .principal
        .as_deref()
        .unwrap_or(&settings.default_principal_id);

    info!("Creating vault {} in {}", name, group);
    let info = session
        .vaults()
        .create(&name, group, location, &settings.tenant_id, principal)?;

    output::success(&format!("vault ready: {}", output::name(&info.name)));
    print_info(&info);
    Ok(())
}

/// Show one vault.
pub fn show(name: &str, group: Option<&str>) -> Result<()> {
    let session = Session::connect()?;
    let info = session.vaults().describe(name, session.group(group))?;
    output::header(&info.name);
    print_info(&info);
    Ok(())
}

/// List vaults in a resource group.
pub fn list(group: Option<&str>, json: bool) -> Result<()> {
    let session = Session::connect()?;
    let group = session.group(group);
    let vaults = session.vaults().list(group)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vaults).map_err(std::io::Error::from)?);
    } else if vaults.is_empty() {
        output::dimmed(&format!("no vaults in {}", group));
    } else {
        output::section(&format!("{} vaults in {}", vaults.len(), group));
        for vault in &vaults {
            output::list_item(&format!("{}  ({}, {})", vault.name, vault.location, vault.state));
        }
    }
    Ok(())
}

/// Request deletion of a vault, confirming first unless `yes`.
pub fn delete(name: &str, group: Option<&str>, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete vault {}?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    let session = Session::connect()?;
    session.vaults().delete(name, session.group(group))?;
    output::success(&format!("deletion requested: {}", output::name(name)));
    output::hint("soft-deleted vaults keep their name reserved until purged");
    Ok(())
}

fn print_info(info: &VaultInfo) {
    output::kv("location:", &info.location);
    output::kv("uri:     ", &info.uri);
    output::kv("state:   ", info.state);
}
