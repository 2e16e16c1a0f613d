//! In-memory implementations of the remote service traits.
//!
//! Compiled for unit tests and with the `test-memory` feature, which the
//! integration tests enable. State lives behind `RefCell` because the
//! service traits take `&self`. Not `Sync`.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use zeroize::Zeroizing;

use crate::core::constants::VAULT_DNS_SUFFIX;
use crate::core::domain::{VaultEndpoint, VaultInfo, VaultState};
use crate::core::secrets::SecretBackend;
use crate::core::storage::BlobService;
use crate::core::vault::{VaultControl, VaultSpec};
use crate::error::{Result, SecretError, StorageError, VaultError};

/// Vault control plane backed by maps.
#[derive(Debug, Default)]
pub struct MemoryVaults {
    groups: RefCell<BTreeSet<String>>,
    vaults: RefCell<BTreeMap<(String, String), VaultSpec>>,
    deleted: RefCell<BTreeSet<String>>,
    reject: RefCell<Option<String>>,
}

impl MemoryVaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource groups created so far.
    pub fn groups(&self) -> Vec<String> {
        self.groups.borrow().iter().cloned().collect()
    }

    /// Last request applied to a vault.
    pub fn spec(&self, group: &str, name: &str) -> Option<VaultSpec> {
        self.vaults
            .borrow()
            .get(&(group.to_string(), name.to_string()))
            .cloned()
    }

    /// Make the next `create_or_update` fail with `message`.
    pub fn reject_next(&self, message: &str) {
        *self.reject.borrow_mut() = Some(message.to_string());
    }

    fn info(spec: &VaultSpec) -> VaultInfo {
        VaultInfo {
            name: spec.name.clone(),
            location: spec.location.clone(),
            uri: format!("https://{}{}/", spec.name, VAULT_DNS_SUFFIX),
            state: VaultState::Active,
        }
    }
}

impl VaultControl for MemoryVaults {
    fn ensure_group(&self, group: &str, _location: &str) -> Result<()> {
        self.groups.borrow_mut().insert(group.to_string());
        Ok(())
    }

    fn create_or_update(&self, spec: &VaultSpec) -> Result<VaultInfo> {
        if let Some(message) = self.reject.borrow_mut().take() {
            return Err(VaultError::Provision(message).into());
        }
        self.deleted.borrow_mut().remove(&spec.name);
        self.vaults
            .borrow_mut()
            .insert((spec.group.clone(), spec.name.clone()), spec.clone());
        Ok(Self::info(spec))
    }

    fn get(&self, group: &str, name: &str) -> Result<VaultInfo> {
        self.spec(group, name)
            .map(|spec| Self::info(&spec))
            .ok_or_else(|| VaultError::NotFound(name.to_string()).into())
    }

    fn delete(&self, group: &str, name: &str) -> Result<()> {
        let removed = self
            .vaults
            .borrow_mut()
            .remove(&(group.to_string(), name.to_string()));
        match removed {
            Some(_) => {
                self.deleted.borrow_mut().insert(name.to_string());
                Ok(())
            }
            None => Err(VaultError::NotFound(name.to_string()).into()),
        }
    }

    fn list(&self, group: &str) -> Result<Vec<VaultInfo>> {
        Ok(self
            .vaults
            .borrow()
            .iter()
            .filter(|((g, _), _)| g == group)
            .map(|(_, spec)| Self::info(spec))
            .collect())
    }

    fn is_deleted(&self, name: &str) -> Result<bool> {
        Ok(self.deleted.borrow().contains(name))
    }
}

/// Remote call recorded by [`MemorySecrets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretCall {
    List,
    Get(String),
    Set(String),
    Delete(String),
    Purge(String),
}

/// Secret store backed by a map.
#[derive(Debug)]
pub struct MemorySecrets {
    endpoint: VaultEndpoint,
    values: RefCell<BTreeMap<String, String>>,
    deleted: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<SecretCall>>,
    writes_left: Cell<Option<usize>>,
}

impl MemorySecrets {
    pub fn new(endpoint: VaultEndpoint) -> Self {
        Self {
            endpoint,
            values: RefCell::default(),
            deleted: RefCell::default(),
            calls: RefCell::default(),
            writes_left: Cell::new(None),
        }
    }

    /// Store for vault `name` pre-filled with `pairs`.
    pub fn with_secrets(name: &str, pairs: &[(&str, &str)]) -> Self {
        let store = Self::new(VaultEndpoint::from_name(name));
        for (k, v) in pairs {
            store.put_remote(k, v);
        }
        store
    }

    /// Change a value behind the store's back, as another client would.
    pub fn put_remote(&self, name: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    /// Current remote value.
    pub fn value(&self, name: &str) -> Option<String> {
        self.values.borrow().get(name).cloned()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<SecretCall> {
        self.calls.borrow().clone()
    }

    /// Names passed to `set`, in order.
    pub fn writes(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SecretCall::Set(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Accept `count` more writes, then reject every following one.
    pub fn fail_writes_after(&self, count: usize) {
        self.writes_left.set(Some(count));
    }

    fn record(&self, call: SecretCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SecretBackend for MemorySecrets {
    fn endpoint(&self) -> &VaultEndpoint {
        &self.endpoint
    }

    fn list_names(&self) -> Result<Vec<String>> {
        self.record(SecretCall::List);
        Ok(self.values.borrow().keys().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Zeroizing<String>> {
        self.record(SecretCall::Get(name.to_string()));
        self.values
            .borrow()
            .get(name)
            .map(|v| Zeroizing::new(v.clone()))
            .ok_or_else(|| SecretError::NotFound(name.to_string()).into())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.record(SecretCall::Set(name.to_string()));
        if let Some(left) = self.writes_left.get() {
            if left == 0 {
                return Err(SecretError::Write {
                    key: name.to_string(),
                    reason: "Forbidden".to_string(),
                }
                .into());
            }
            self.writes_left.set(Some(left - 1));
        }
        self.deleted.borrow_mut().remove(name);
        self.put_remote(name, value);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.record(SecretCall::Delete(name.to_string()));
        match self.values.borrow_mut().remove(name) {
            Some(_) => {
                self.deleted.borrow_mut().insert(name.to_string());
                Ok(())
            }
            None => Err(SecretError::NotFound(name.to_string()).into()),
        }
    }

    fn purge(&self, name: &str) -> Result<()> {
        self.record(SecretCall::Purge(name.to_string()));
        if self.deleted.borrow_mut().remove(name) {
            Ok(())
        } else {
            Err(SecretError::NotFound(name.to_string()).into())
        }
    }
}

/// Blob service backed by a map.
#[derive(Debug, Default)]
pub struct MemoryBlobs {
    containers: RefCell<BTreeSet<String>>,
    created: RefCell<Vec<String>>,
    blobs: RefCell<BTreeMap<(String, String), Vec<u8>>>,
    reject: RefCell<Option<String>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with containers that already exist.
    pub fn with_containers(names: &[&str]) -> Self {
        let blobs = Self::new();
        blobs
            .containers
            .borrow_mut()
            .extend(names.iter().map(|n| n.to_string()));
        blobs
    }

    /// Containers created through the service, in order.
    pub fn created(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    /// Stored bytes of one blob.
    pub fn blob(&self, container: &str, name: &str) -> Option<Vec<u8>> {
        self.blobs
            .borrow()
            .get(&(container.to_string(), name.to_string()))
            .cloned()
    }

    /// Number of stored blobs across all containers.
    pub fn blob_count(&self) -> usize {
        self.blobs.borrow().len()
    }

    /// Make the next upload fail with `message`.
    pub fn reject_next(&self, message: &str) {
        *self.reject.borrow_mut() = Some(message.to_string());
    }
}

impl BlobService for MemoryBlobs {
    fn container_exists(&self, container: &str) -> Result<bool> {
        Ok(self.containers.borrow().contains(container))
    }

    fn create_container(&self, container: &str) -> Result<()> {
        if self.containers.borrow_mut().insert(container.to_string()) {
            self.created.borrow_mut().push(container.to_string());
        }
        Ok(())
    }

    fn upload_blob(
        &self,
        container: &str,
        object_name: &str,
        data: &[u8],
        overwrite: bool,
    ) -> Result<()> {
        let upload_error = |reason: &str| StorageError::Upload {
            container: container.to_string(),
            object: object_name.to_string(),
            reason: reason.to_string(),
        };

        if let Some(message) = self.reject.borrow_mut().take() {
            return Err(upload_error(&message).into());
        }
        if !self.containers.borrow().contains(container) {
            return Err(upload_error("ContainerNotFound").into());
        }

        let key = (container.to_string(), object_name.to_string());
        let mut blobs = self.blobs.borrow_mut();
        if blobs.contains_key(&key) && !overwrite {
            return Err(upload_error("BlobAlreadyExists").into());
        }
        blobs.insert(key, data.to_vec());
        Ok(())
    }
}
