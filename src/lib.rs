//! Azurify - Key Vault, secrets and Blob Storage plumbing for Shopify apps.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── name          # Vault name derivation
//! │   ├── vault         # Vault create/show/list/delete
//! │   ├── secrets       # Secret CRUD and document load
//! │   ├── convert       # Records to csv/json/xlsx
//! │   ├── upload        # Convert and upload to blob storage
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # AZURE_* settings
//!     ├── naming        # Store identifier -> vault name
//!     ├── convert/      # Tabular converters
//!     ├── vault/        # VaultControl trait, VaultManager
//!     ├── secrets       # SecretBackend trait, SecretStore
//!     ├── storage/      # BlobService trait, BlobUploader
//!     ├── az/           # `az` CLI implementations of the traits
//!     └── memory        # In-memory implementations (test-memory feature)
//! ```
//!
//! # Flow
//!
//! A store identifier becomes a vault name, the vault is provisioned with
//! an access policy, secrets are loaded into it, and converted exports are
//! uploaded with the storage connection string kept in the vault.

pub mod cli;
pub mod core;
pub mod error;
