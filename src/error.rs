//! Error types.
//!
//! Each component owns a small error enum; they all fold into [`Error`]
//! so callers can use `?` across component boundaries.

use thiserror::Error;

/// Top-level error for azurify operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Credential acquisition or authorization failed at the provider.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Missing or malformed process configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("az CLI not found on PATH (install it from https://aka.ms/azure-cli)")]
    AzNotInstalled,
}

/// Store identifier rejected before any remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("invalid store identifier '{0}': expected <name>.myshopify.com")]
    InvalidFormat(String),

    #[error("invalid store name '{name}': character '{ch}' is not allowed (use A-Z, a-z, 0-9, -)")]
    InvalidCharacters { name: String, ch: char },
}

/// Tabular conversion failures.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("unknown format '{0}' (supported: csv, json, xlsx)")]
    UnknownFormat(String),

    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("records file must contain a JSON array of objects: {0}")]
    InvalidRecords(String),

    #[error("{0} columns do not fit in a worksheet")]
    TooManyColumns(usize),

    #[error("{0} records do not fit in a worksheet")]
    TooManyRows(usize),
}

/// Vault control-plane failures.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("vault provisioning failed: {0}")]
    Provision(String),

    #[error("vault not found: {0}")]
    NotFound(String),

    #[error("vault request failed: {0}")]
    Request(String),

    #[error("invalid vault endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Secret store failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("failed to write secret {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("secret request failed: {0}")]
    Request(String),

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("failed to read secrets document {path}: {source}")]
    ReadDocument {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse secrets document {path}: {source}")]
    ParseDocument {
        path: String,
        source: serde_json::Error,
    },

    #[error("secrets document {path}: value of {key} must be a string")]
    InvalidDocumentValue { path: String, key: String },
}

/// Blob storage failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("upload of {object} to container {container} failed: {reason}")]
    Upload {
        container: String,
        object: String,
        reason: String,
    },

    #[error("storage request failed: {0}")]
    Request(String),

    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
