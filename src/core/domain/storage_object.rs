//! Object queued for upload to blob storage.

use crate::core::convert::ConvertedPayload;

/// Object name, target container and bytes to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub object_name: String,
    pub container_name: String,
    pub data: Vec<u8>,
}

impl StorageObject {
    pub fn new(
        container_name: impl Into<String>,
        object_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            container_name: container_name.into(),
            data,
        }
    }

    /// Wrap a converted payload.
    pub fn from_payload(
        container_name: impl Into<String>,
        object_name: impl Into<String>,
        payload: ConvertedPayload,
    ) -> Self {
        Self::new(container_name, object_name, payload.into_bytes())
    }
}
