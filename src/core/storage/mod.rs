//! Blob upload.
//!
//! `BlobUploader` writes converted payloads into a storage container,
//! creating the container on first use.

use tracing::{debug, info};

use crate::core::domain::StorageObject;
use crate::core::validation::{validate_container_name, validate_object_name};
use crate::error::{Error, Result, StorageError};

/// Blob service operations for one storage account.
///
/// Implemented by the `az` driver and by the in-memory test double.
pub trait BlobService {
    fn container_exists(&self, container: &str) -> Result<bool>;

    fn create_container(&self, container: &str) -> Result<()>;

    /// Write one blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Upload` if the provider rejects the write.
    fn upload_blob(
        &self,
        container: &str,
        object_name: &str,
        data: &[u8],
        overwrite: bool,
    ) -> Result<()>;
}

/// Uploads payloads, overwriting existing blobs of the same name.
#[derive(Debug)]
pub struct BlobUploader<S> {
    service: S,
}

impl<S: BlobService> BlobUploader<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Upload `payload` as `container/object_name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` before any remote call for a
    /// malformed container or object name, and `StorageError::Upload` if
    /// the container cannot be created or the write is rejected, auth
    /// failures included.
    pub fn upload(&self, container: &str, object_name: &str, payload: &[u8]) -> Result<()> {
        validate_container_name(container)?;
        validate_object_name(object_name)?;

        let as_upload_error = |e: Error| -> Error {
            match e {
                Error::Storage(StorageError::Request(reason)) | Error::Auth(reason) => {
                    StorageError::Upload {
                        container: container.to_string(),
                        object: object_name.to_string(),
                        reason,
                    }
                    .into()
                }
                other => other,
            }
        };

        if !self.service.container_exists(container).map_err(as_upload_error)? {
            self.service
                .create_container(container)
                .map_err(as_upload_error)?;
            info!(container = %container, "created storage container");
        }

        self.service
            .upload_blob(container, object_name, payload, true)
            .map_err(as_upload_error)?;

        debug!(container = %container, blob = %object_name, bytes = payload.len(), "upload complete");
        Ok(())
    }

    /// Upload a prepared object.
    pub fn upload_object(&self, object: &StorageObject) -> Result<()> {
        self.upload(&object.container_name, &object.object_name, &object.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryBlobs;

    #[test]
    fn test_upload_creates_missing_container() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        uploader.upload("exports", "data.csv", b"a,b\n1,2\n").unwrap();

        assert_eq!(uploader.service().created(), vec!["exports".to_string()]);
        assert_eq!(
            uploader.service().blob("exports", "data.csv"),
            Some(b"a,b\n1,2\n".to_vec())
        );
    }

    #[test]
    fn test_upload_into_existing_container() {
        let uploader = BlobUploader::new(MemoryBlobs::with_containers(&["exports"]));
        uploader.upload("exports", "data.csv", b"x").unwrap();
        assert!(uploader.service().created().is_empty());
    }

    #[test]
    fn test_upload_overwrites() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        uploader.upload("exports", "data.csv", b"old").unwrap();
        uploader.upload("exports", "data.csv", b"new").unwrap();
        assert_eq!(
            uploader.service().blob("exports", "data.csv"),
            Some(b"new".to_vec())
        );
        assert_eq!(uploader.service().blob_count(), 1);
    }

    #[test]
    fn test_empty_payload_is_uploaded() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        uploader.upload("exports", "empty.json", b"").unwrap();
        assert_eq!(uploader.service().blob("exports", "empty.json"), Some(vec![]));
    }

    #[test]
    fn test_invalid_container_rejected_before_remote_call() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        let err = uploader.upload("Bad_Name", "data.csv", b"x").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::InvalidName { .. })));
        assert!(uploader.service().created().is_empty());
    }

    #[test]
    fn test_rejected_upload_surfaces() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        uploader.service().reject_next("AuthorizationFailure");
        let err = uploader.upload("exports", "data.csv", b"x").unwrap_err();
        match err {
            Error::Storage(StorageError::Upload { container, object, reason }) => {
                assert_eq!(container, "exports");
                assert_eq!(object, "data.csv");
                assert_eq!(reason, "AuthorizationFailure");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    struct DeniedBlobs;

    impl BlobService for DeniedBlobs {
        fn container_exists(&self, _container: &str) -> Result<bool> {
            Ok(true)
        }

        fn create_container(&self, _container: &str) -> Result<()> {
            Ok(())
        }

        fn upload_blob(&self, _: &str, _: &str, _: &[u8], _: bool) -> Result<()> {
            Err(Error::Auth("AuthenticationFailed".into()))
        }
    }

    #[test]
    fn test_auth_failure_surfaces_as_upload_error() {
        let err = BlobUploader::new(DeniedBlobs)
            .upload("exports", "data.csv", b"x")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::Upload { ref reason, .. }) if reason == "AuthenticationFailed"
        ));
    }

    #[test]
    fn test_upload_object() {
        let uploader = BlobUploader::new(MemoryBlobs::new());
        let object = StorageObject::new("exports", "data.json", b"[]".to_vec());
        uploader.upload_object(&object).unwrap();
        assert_eq!(uploader.service().blob("exports", "data.json"), Some(b"[]".to_vec()));
    }
}
