//! Existence checks against the object store.
//!
//! The store's "not found" signal is folded into `Ok(false)` here and nowhere
//! else. Every other failure is passed through untouched and must never be
//! read as "absent".

use crate::error::StorageError;
use crate::services::storage::StorageService;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ExistenceOracle: Send + Sync {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;
}

/// Maps the outcome of a HEAD request onto the oracle result.
///
/// | head                  | result          |
/// |-----------------------|-----------------|
/// | found                 | `Ok(true)`      |
/// | `NotFound`            | `Ok(false)`     |
/// | any other error       | `Err(error)`    |
pub fn decide(head: Result<(), StorageError>) -> Result<bool, StorageError> {
    match head {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Oracle backed by a storage service's `head_object`.
pub struct StorageOracle {
    storage: Arc<dyn StorageService>,
}

impl StorageOracle {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ExistenceOracle for StorageOracle {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        let head = self.storage.head_object(bucket, key).await;
        let decision = decide(head);
        match &decision {
            Ok(found) => tracing::debug!("HeadObject s3://{}/{}: exists={}", bucket, key, found),
            Err(e) => tracing::warn!("HeadObject s3://{}/{} failed: {}", bucket, key, e),
        }
        decision
    }
}
