//! Blob storage through `az storage`.
//!
//! The connection string is handed to the child process through
//! `AZURE_STORAGE_CONNECTION_STRING` rather than argv.

use serde::Deserialize;
use std::io::Write;
use tracing::debug;
use zeroize::Zeroizing;

use super::AzCli;
use crate::core::storage::BlobService;
use crate::error::{Result, StorageError};

const CONNECTION_STRING_ENV: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Blob service of one storage account, backed by the `az` CLI.
pub struct AzBlobService {
    cli: AzCli,
    connection_string: Zeroizing<String>,
}

impl std::fmt::Debug for AzBlobService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzBlobService")
            .field("cli", &self.cli)
            .field("connection_string", &"<redacted>")
            .finish()
    }
}

impl AzBlobService {
    pub fn new(cli: AzCli, connection_string: impl Into<String>) -> Self {
        Self {
            cli,
            connection_string: Zeroizing::new(connection_string.into()),
        }
    }

    fn env(&self) -> [(&str, &str); 1] {
        [(CONNECTION_STRING_ENV, self.connection_string.as_str())]
    }
}

#[derive(Deserialize)]
struct Exists {
    exists: bool,
}

impl BlobService for AzBlobService {
    fn container_exists(&self, container: &str) -> Result<bool> {
        let result: Exists = self
            .cli
            .json_with_env(
                &["storage", "container", "exists", "--name", container],
                &self.env(),
            )
            .map_err(|f| f.into_rejection(|m| StorageError::Request(m).into()))?;
        Ok(result.exists)
    }

    fn create_container(&self, container: &str) -> Result<()> {
        self.cli
            .run_with_env(
                &["storage", "container", "create", "--name", container],
                &self.env(),
            )
            .map_err(|f| f.into_rejection(|m| StorageError::Request(m).into()))?;
        Ok(())
    }

    fn upload_blob(
        &self,
        container: &str,
        object_name: &str,
        data: &[u8],
        overwrite: bool,
    ) -> Result<()> {
        let upload_error = |reason: String| StorageError::Upload {
            container: container.to_string(),
            object: object_name.to_string(),
            reason,
        };

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(data)?;
        file.flush()?;
        let path = file.path().to_string_lossy().to_string();

        let mut args = vec![
            "storage",
            "blob",
            "upload",
            "--container-name",
            container,
            "--name",
            object_name,
            "--file",
            path.as_str(),
        ];
        if overwrite {
            args.extend(["--overwrite", "true"]);
        }

        self.cli
            .run_with_env(&args, &self.env())
            .map_err(|f| f.into_rejection(|m| upload_error(m).into()))?;

        debug!(container = %container, blob = %object_name, bytes = data.len(), "blob uploaded");
        Ok(())
    }
}
