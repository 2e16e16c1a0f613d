//! Azurify - Key Vault, secrets and Blob Storage plumbing for Shopify apps.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use azurify::cli::output;
use azurify::cli::{execute, Cli};
use azurify::core::constants::LOG_ENV;
use azurify::error::{ConfigError, Error, NameError, SecretError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("azurify=debug")
        } else {
            EnvFilter::new("azurify=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::Missing(var)) => Some(format!("export {var}=<value>")),
            Error::Config(ConfigError::AzNotInstalled) => {
                Some("install the Azure CLI, then retry".to_string())
            }
            Error::Name(NameError::InvalidFormat(_)) => {
                Some("expected a store identifier like mystore.myshopify.com".to_string())
            }
            Error::Auth(_) => {
                Some("check AZURE_CLIENT_ID, AZURE_CLIENT_SECRET and AZURE_TENANT_ID".to_string())
            }
            Error::Secret(SecretError::NotFound(key)) => {
                Some(format!("run: azurify secrets list --vault <NAME> to see stored keys ({key} missing)"))
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
