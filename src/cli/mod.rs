//! Command-line interface.

pub mod completions;
pub mod convert;
pub mod name;
pub mod output;
pub mod secrets;
pub mod session;
pub mod upload;
pub mod vault;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Azurify - Key Vault, secrets and Blob Storage plumbing for Shopify apps.
#[derive(Parser)]
#[command(
    name = "azurify",
    about = "Key Vault, secrets and Blob Storage plumbing for Shopify apps",
    version,
    after_help = "Azure credentials are read from AZURE_* environment variables."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the vault name derived from a store identifier
    Name {
        /// Store identifier (e.g., mystore.myshopify.com)
        store: String,
    },

    /// Provision and inspect Key Vaults
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Read and write secrets in a vault
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Convert a JSON array of records to csv, json or xlsx
    Convert {
        /// JSON file holding an array of objects
        input: PathBuf,
        /// Output format (csv, json, xlsx)
        #[arg(short, long)]
        format: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert records and upload them to blob storage
    Upload {
        /// JSON file holding an array of objects
        input: PathBuf,
        /// Output format (csv, json, xlsx)
        #[arg(short, long)]
        format: String,
        /// Target container (created if absent)
        #[arg(short, long)]
        container: String,
        /// Blob name (defaults to data-<timestamp>.<ext>)
        #[arg(short, long)]
        name: Option<String>,
        /// Read the storage connection string from this vault
        #[arg(long, conflicts_with = "connection_string", required_unless_present = "connection_string")]
        vault: Option<String>,
        /// Storage account connection string
        #[arg(long, env = "AZURIFY_STORAGE_CONNECTION_STRING", hide_env_values = true)]
        connection_string: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Vault subcommands.
#[derive(Subcommand)]
pub enum VaultAction {
    /// Create (or update) a vault with full secret access for a principal
    Create {
        /// Vault name (derived from --store when omitted)
        #[arg(required_unless_present = "store", conflicts_with = "store")]
        name: Option<String>,
        /// Derive the vault name from this store identifier
        #[arg(long)]
        store: Option<String>,
        /// Resource group (defaults to AZURE_DEFAULT_GROUP_NAME)
        #[arg(short, long)]
        group: Option<String>,
        /// Region (defaults to AZURE_DEFAULT_LOCATION)
        #[arg(short, long)]
        location: Option<String>,
        /// Principal object id (defaults to AZURE_DEFAULT_OBJECT_ID)
        #[arg(short, long)]
        principal: Option<String>,
    },

    /// Show a vault's location, URI and state
    Show {
        name: String,
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List vaults in a resource group
    List {
        #[arg(short, long)]
        group: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request deletion of a vault
    Delete {
        name: String,
        #[arg(short, long)]
        group: Option<String>,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Secrets subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// List secret names
    List {
        #[arg(long)]
        vault: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a secret value
    Get {
        key: String,
        #[arg(long)]
        vault: String,
    },

    /// Create or overwrite a secret
    Set {
        key: String,
        value: String,
        #[arg(long)]
        vault: String,
    },

    /// Delete a secret
    Rm {
        key: String,
        #[arg(long)]
        vault: String,
        /// Also purge it so the name can be reused immediately
        #[arg(long)]
        purge: bool,
    },

    /// Load recognized keys from a flat JSON document
    Load {
        /// JSON object of string values
        path: PathBuf,
        #[arg(long)]
        vault: String,
    },
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Name { store } => name::execute(&store),
        Vault { action } => match action {
            VaultAction::Create {
                name,
                store,
                group,
                location,
                principal,
            } => vault::create(vault::CreateArgs {
                name,
                store,
                group,
                location,
                principal,
            }),
            VaultAction::Show { name, group } => vault::show(&name, group.as_deref()),
            VaultAction::List { group, json } => vault::list(group.as_deref(), json),
            VaultAction::Delete { name, group, yes } => {
                vault::delete(&name, group.as_deref(), yes)
            }
        },
        Secrets { action } => match action {
            SecretsAction::List { vault, json } => secrets::list(&vault, json),
            SecretsAction::Get { key, vault } => secrets::get(&vault, &key),
            SecretsAction::Set { key, value, vault } => secrets::set(&vault, &key, &value),
            SecretsAction::Rm { key, vault, purge } => secrets::rm(&vault, &key, purge),
            SecretsAction::Load { path, vault } => secrets::load(&vault, &path),
        },
        Convert {
            input,
            format,
            output,
        } => convert::execute(&input, &format, output.as_deref()),
        Upload {
            input,
            format,
            container,
            name,
            vault,
            connection_string,
        } => upload::execute(upload::UploadArgs {
            input,
            format,
            container,
            name,
            vault,
            connection_string,
        }),
        Completions { shell } => completions::execute(shell),
    }
}
