//! Secret store.
//!
//! `SecretStore` keeps an in-memory snapshot of one vault's secrets and
//! writes every change through to the remote store first.
//!
//! The snapshot is filled once on [`SecretStore::open`] and afterwards only
//! changes through this store's own `set`, `get` and `delete` calls.
//! Changes made by other clients are not picked up.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::domain::{Secret, SecretKey, VaultEndpoint};
use crate::core::validation::validate_secret_name;
use crate::error::{Result, SecretError};

/// Secret store data-plane operations.
///
/// Implemented by the `az` driver and by the in-memory test double.
pub trait SecretBackend {
    /// Vault this backend talks to.
    fn endpoint(&self) -> &VaultEndpoint;

    /// Names of every secret in the vault.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Current value of a secret.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the secret does not exist.
    fn get(&self, name: &str) -> Result<Zeroizing<String>>;

    /// Create or overwrite a secret.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::Write` if the provider rejects the write,
    /// permission denials included.
    fn set(&self, name: &str, value: &str) -> Result<()>;

    /// Delete a secret (soft delete where the vault retains it).
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the secret does not exist.
    fn delete(&self, name: &str) -> Result<()>;

    /// Permanently remove a deleted secret.
    fn purge(&self, name: &str) -> Result<()>;
}

/// Outcome of loading a secrets document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Recognized keys written to the vault, in document order.
    pub written: Vec<SecretKey>,
    /// Document keys that are not recognized and were not written.
    pub skipped: Vec<String>,
    /// Recognized keys the document did not contain.
    pub missing: Vec<SecretKey>,
}

/// Snapshot of one vault's secrets with write-through updates.
pub struct SecretStore<B> {
    backend: B,
    snapshot: BTreeMap<String, Zeroizing<String>>,
}

// values never appear in debug output
impl<B: SecretBackend> std::fmt::Debug for SecretStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("vault", &self.backend.endpoint().name())
            .field("keys", &self.snapshot.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<B: SecretBackend> SecretStore<B> {
    /// Open a store, fetching every secret currently in the vault.
    ///
    /// One round trip per secret.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if listing or any fetch fails.
    pub fn open(backend: B) -> Result<Self> {
        let mut snapshot = BTreeMap::new();
        for name in backend.list_names()? {
            let value = backend.get(&name)?;
            snapshot.insert(name, value);
        }

        debug!(
            vault = %backend.endpoint().name(),
            secrets = snapshot.len(),
            "secret snapshot loaded"
        );

        Ok(Self { backend, snapshot })
    }

    /// Vault this store reads and writes.
    pub fn endpoint(&self) -> &VaultEndpoint {
        self.backend.endpoint()
    }

    /// Underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load recognized keys from a flat JSON document.
    ///
    /// Recognized keys are written to the vault and cached. Unrecognized
    /// keys are skipped with a warning. A failed write aborts the load;
    /// keys written before it stay written.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::ReadDocument`/`ParseDocument` if the file
    /// cannot be read or is not a JSON object of strings, or the backend
    /// error of the first failed write.
    pub fn load_from_document(&mut self, path: &Path) -> Result<LoadReport> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| SecretError::ReadDocument {
            path: display.clone(),
            source,
        })?;
        let document: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|source| SecretError::ParseDocument {
                path: display.clone(),
                source,
            })?;

        let mut entries = Vec::with_capacity(document.len());
        for (key, value) in &document {
            let Value::String(value) = value else {
                return Err(SecretError::InvalidDocumentValue {
                    path: display,
                    key: key.clone(),
                }
                .into());
            };
            entries.push((key.as_str(), value.as_str()));
        }

        self.load_entries(&entries, &display)
    }

    /// Load recognized keys from in-memory pairs.
    ///
    /// Same filtering as [`load_from_document`](Self::load_from_document);
    /// `source` only labels log output.
    pub fn load_entries(&mut self, entries: &[(&str, &str)], source: &str) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for (name, value) in entries {
            match SecretKey::parse(name) {
                Some(key) => {
                    self.set(key.as_str(), value)?;
                    report.written.push(key);
                }
                None => {
                    warn!(key = %name, source = %source, "skipping unrecognized secret key");
                    report.skipped.push(name.to_string());
                }
            }
        }

        report.missing = SecretKey::ALL
            .into_iter()
            .filter(|k| !report.written.contains(k))
            .collect();
        if !report.missing.is_empty() {
            debug!(missing = ?report.missing, source = %source, "recognized keys absent from document");
        }

        Ok(report)
    }

    /// Write a secret to the vault, then cache it.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidName` before any remote call if the
    /// name is not a valid Key Vault secret name, or `SecretError::Write`
    /// if the provider rejects it.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        validate_secret_name(name)?;
        self.backend.set(name, value)?;
        self.snapshot
            .insert(name.to_string(), Zeroizing::new(value.to_string()));
        Ok(())
    }

    /// Write a recognized secret.
    pub fn set_known(&mut self, key: SecretKey, value: &str) -> Result<()> {
        self.set(key.as_str(), value)
    }

    /// Fetch a secret from the vault and refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the vault has no such secret.
    pub fn get(&mut self, name: &str) -> Result<Zeroizing<String>> {
        validate_secret_name(name)?;
        let value = self.backend.get(name)?;
        self.snapshot.insert(name.to_string(), value.clone());
        Ok(value)
    }

    /// Delete a secret from the vault and the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the vault has no such secret.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        validate_secret_name(name)?;
        self.backend.delete(name)?;
        self.snapshot.remove(name);
        Ok(())
    }

    /// Permanently remove a previously deleted secret.
    pub fn purge(&mut self, name: &str) -> Result<()> {
        validate_secret_name(name)?;
        self.backend.purge(name)?;
        self.snapshot.remove(name);
        Ok(())
    }

    /// Every cached secret, keyed by name.
    pub fn secrets(&self) -> &BTreeMap<String, Zeroizing<String>> {
        &self.snapshot
    }

    /// Cached value of any secret.
    pub fn cached(&self, name: &str) -> Option<&str> {
        self.snapshot.get(name).map(|v| v.as_str())
    }

    /// Cached value of a recognized secret.
    pub fn known(&self, key: SecretKey) -> Option<&str> {
        self.cached(key.as_str())
    }

    pub fn shop_domain(&self) -> Option<&str> {
        self.known(SecretKey::ShopDomain)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.known(SecretKey::ApiVersion)
    }

    pub fn api_access_token(&self) -> Option<&str> {
        self.known(SecretKey::ApiAccessToken)
    }

    pub fn api_client_secret_key(&self) -> Option<&str> {
        self.known(SecretKey::ApiClientSecretKey)
    }

    pub fn storage_connection_string(&self) -> Option<&str> {
        self.known(SecretKey::StorageConnectionString)
    }

    /// Cached secrets as entries, sorted by name.
    pub fn list(&self) -> Vec<Secret> {
        self.snapshot
            .iter()
            .map(|(name, value)| Secret::new(name.clone(), value.as_str()))
            .collect()
    }

    /// Number of cached secrets.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}
