use crate::error::ShareError;
use crate::models::{UploadOutcome, UploadRequest};
use crate::services::existence::{ExistenceOracle, StorageOracle};
use crate::services::file_system::FileSystem;
use crate::services::storage::StorageService;
use crate::utils::hash::calculate_fingerprint_from_reader;
use crate::utils::key::{derive_key_for_path, object_url};
use std::io::SeekFrom;
use std::sync::Arc;
use tokio::io::AsyncSeekExt;

/// Content-addressed, deduplicated upload of a single file.
///
/// stat -> open -> hash -> derive key -> existence check -> upload or skip.
/// The file handle is owned by `upload` and released exactly once on every
/// exit path, including errors.
pub struct UploadService {
    file_system: Arc<dyn FileSystem>,
    oracle: Arc<dyn ExistenceOracle>,
    storage: Arc<dyn StorageService>,
}

impl UploadService {
    pub fn new(
        file_system: Arc<dyn FileSystem>,
        oracle: Arc<dyn ExistenceOracle>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            file_system,
            oracle,
            storage,
        }
    }

    /// Uses the storage service's own HEAD request as the existence oracle.
    pub fn with_storage(file_system: Arc<dyn FileSystem>, storage: Arc<dyn StorageService>) -> Self {
        let oracle = Arc::new(StorageOracle::new(storage.clone()));
        Self::new(file_system, oracle, storage)
    }

    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadOutcome, ShareError> {
        let path = request.path();

        let stat = self.file_system.stat(path).await.map_err(|e| {
            tracing::debug!("stat {} failed: {}", path.display(), e);
            ShareError::FileUnreadable {
                path: path.to_path_buf(),
            }
        })?;

        let mut handle = self
            .file_system
            .open(path)
            .await
            .map_err(|source| ShareError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let fingerprint = calculate_fingerprint_from_reader(&mut handle).await?;
        let key = derive_key_for_path(&fingerprint, path);
        let url = object_url(&request.bucket, &key);
        tracing::debug!("{} ({} bytes) -> {}", path.display(), stat.len, key);

        if self.oracle.exists(&request.bucket, key.as_str()).await? {
            drop(handle);
            tracing::info!("♻️  Already shared, skipping upload: {}", key);
            return Ok(UploadOutcome {
                url,
                key,
                transferred: false,
            });
        }

        // Hashing consumed the stream.
        handle
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|source| ShareError::Rewind {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!("☁️  Uploading {} to s3://{}/{}", path.display(), request.bucket, key);
        self.storage
            .put_public_object(&request.bucket, key.as_str(), &mut handle)
            .await?;
        drop(handle);

        tracing::info!("✅ Uploaded {}", key);
        Ok(UploadOutcome {
            url,
            key,
            transferred: true,
        })
    }
}
