//! Scripted stand-in for the `az` CLI.
//!
//! Knows one vault, `kv-present`, holding `SHOPDOMAIN` and `APIVERSION`.
//! Vaults created through `keyvault create` are shown afterwards. Names
//! containing `denied` get an `AuthenticationFailed` error on writes.
//! Every invocation is appended to `calls.log` next to the script, and the
//! storage connection string seen by each storage call to `storage.env`.
//! Uploaded blobs are copied to `blob-<container>-<name>`. Unix only.

use std::path::{Path, PathBuf};

const SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "__DIR__/calls.log"
DENIED="ERROR: Server failed to authenticate the request. ErrorCode:AuthenticationFailed"
case "$1 $2 $3" in
  "login "*) echo '[]' ;;
  "account set "*) ;;
  "group create "*)
    case "$*" in
      *denied*) echo "ERROR: (AuthorizationFailed) The client may not create groups in $5" >&2; exit 1 ;;
      *) echo '{}' ;;
    esac ;;
  "keyvault show "*)
    if [ "$4" = "kv-present" ] || grep -q "^keyvault create --name $4 " "__DIR__/calls.log"; then
      echo "{\"name\":\"$4\",\"location\":\"westeurope\",\"properties\":{\"vaultUri\":\"https://$4.vault.azure.net/\",\"provisioningState\":\"Succeeded\"}}"
    else
      echo "ERROR: (ResourceNotFound) The Resource 'Microsoft.KeyVault/vaults/$4' was not found." >&2; exit 3
    fi ;;
  "keyvault create "*)
    case "$*" in
      *denied*) echo "ERROR: (AuthorizationFailed) The client does not have authorization to perform action 'Microsoft.KeyVault/vaults/write'" >&2; exit 1 ;;
      *) echo '{}' ;;
    esac ;;
  "keyvault update "*) echo '{}' ;;
  "keyvault set-policy "*) echo '{}' ;;
  "keyvault list "*) echo '[{"name":"kv-present","location":"westeurope"}]' ;;
  "keyvault secret list") echo '["SHOPDOMAIN","APIVERSION"]' ;;
  "keyvault secret show")
    case "$*" in
      *SHOPDOMAIN*) echo '{"name":"SHOPDOMAIN","value":"mystore.myshopify.com"}' ;;
      *APIVERSION*) echo '{"name":"APIVERSION","value":"2024-01"}' ;;
      *NOVALUE*) echo '{"name":"NOVALUE","contentType":"text/plain"}' ;;
      *) echo "ERROR: (SecretNotFound) A secret with (name/id) x was not found in this key vault." >&2; exit 3 ;;
    esac ;;
  "keyvault secret set")
    case "$*" in
      *denied*) echo "$DENIED" >&2; exit 1 ;;
      *) echo '{}' ;;
    esac ;;
  "keyvault secret delete")
    case "$*" in
      *APIVERSION*) echo '{}' ;;
      *) echo "ERROR: (SecretNotFound) A secret with (name/id) x was not found in this key vault." >&2; exit 3 ;;
    esac ;;
  "storage container exists")
    echo "$AZURE_STORAGE_CONNECTION_STRING" >> "__DIR__/storage.env"
    if grep -q "^storage container create --name $5 " "__DIR__/calls.log"; then
      echo '{"exists": true}'
    else
      echo '{"exists": false}'
    fi ;;
  "storage container create")
    echo "$AZURE_STORAGE_CONNECTION_STRING" >> "__DIR__/storage.env"
    echo '{"created": true}' ;;
  "storage blob upload")
    echo "$AZURE_STORAGE_CONNECTION_STRING" >> "__DIR__/storage.env"
    case "$*" in
      *denied*) echo "$DENIED" >&2; exit 1 ;;
      *) cp "$9" "__DIR__/blob-$5-$7"; echo '{}' ;;
    esac ;;
  *) echo "ERROR: (AuthorizationFailed) fake az refuses: $*" >&2; exit 1 ;;
esac
"#;

/// Directory holding an executable `az` script.
pub struct FakeAz {
    dir: PathBuf,
}

impl FakeAz {
    /// Install the script under `root/bin`.
    #[cfg(unix)]
    pub fn install(root: &Path) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = root.join("bin");
        std::fs::create_dir_all(&dir).expect("failed to create bin dir");
        let script = SCRIPT.replace("__DIR__", &dir.display().to_string());

        let path = dir.join("az");
        std::fs::write(&path, script).expect("failed to write fake az");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake az");

        Self { dir }
    }

    /// Directory to put first on PATH.
    pub fn bin(&self) -> &Path {
        &self.dir
    }

    /// Path of the script itself.
    pub fn program(&self) -> PathBuf {
        self.dir.join("az")
    }

    /// Argument lines of every invocation so far.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Connection strings seen by storage calls, one line per call.
    pub fn storage_env(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.join("storage.env"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Bytes of an uploaded blob.
    pub fn blob(&self, container: &str, name: &str) -> Option<Vec<u8>> {
        std::fs::read(self.dir.join(format!("blob-{}-{}", container, name))).ok()
    }
}
