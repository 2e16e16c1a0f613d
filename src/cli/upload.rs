//! Upload command.
//!
//! Converts a records file and writes it to blob storage. The connection
//! string comes either from the flag or from the vault's
//! `AZSTORAGECONNSTR` secret.

use chrono::Utc;
use std::path::PathBuf;

use crate::cli::output;
use crate::cli::session::Session;
use crate::core::az::{AzBlobService, AzCli};
use crate::core::convert::{self, Format};
use crate::core::domain::{SecretKey, StorageObject};
use crate::core::storage::BlobUploader;
use crate::error::{Result, SecretError};

/// Arguments of `upload`.
pub struct UploadArgs {
    pub input: PathBuf,
    pub format: String,
    pub container: String,
    pub name: Option<String>,
    pub vault: Option<String>,
    pub connection_string: Option<String>,
}

/// Blob name used when none is given: `data-<UTC timestamp>.<ext>`.
pub fn default_object_name(format: Format) -> String {
    format!(
        "data-{}.{}",
        Utc::now().format("%Y%m%dT%H%M%SZ"),
        format.extension()
    )
}

/// Convert and upload.
pub fn execute(args: UploadArgs) -> Result<()> {
    let format: Format = args.format.parse()?;
    let records = convert::read_records(&args.input)?;
    let payload = convert::convert_to(format, &records)?;
    let object_name = args
        .name
        .unwrap_or_else(|| default_object_name(format));

    let (cli, connection_string) = match (args.connection_string, args.vault) {
        (Some(cs), _) => (AzCli::locate()?, cs),
        (None, vault) => {
            let session = Session::connect()?;
            let store = session.secrets(vault.as_deref().unwrap_or_default())?;
            let cs = store
                .storage_connection_string()
                .map(str::to_string)
                .ok_or_else(|| SecretError::NotFound(SecretKey::StorageConnectionString.to_string()))?;
            (session.cli, cs)
        }
    };

    let object = StorageObject::from_payload(&args.container, &object_name, payload);
    let uploader = BlobUploader::new(AzBlobService::new(cli, connection_string));
    uploader.upload_object(&object)?;

    output::success(&format!(
        "uploaded {}",
        output::name(&format!("{}/{}", object.container_name, object.object_name))
    ));
    output::kv("bytes:", object.data.len());
    Ok(())
}
