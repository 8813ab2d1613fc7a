use crate::error::StorageError;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Readable upload body. The caller keeps ownership of the underlying handle.
pub type ObjectBody<'a> = &'a mut (dyn AsyncRead + Unpin + Send);

/// Transport port onto an object store.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Metadata-only lookup. Absent objects are reported as
    /// `StorageError::NotFound`, anything else that goes wrong as another
    /// variant.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    /// Stores the remaining content of `body` under `key`, readable by anyone.
    ///
    /// `S3StorageService` sends each object as a single `PutObject`, so it
    /// holds the whole remaining body in memory for the duration of the call.
    /// Peak memory per file is roughly the file size.
    async fn put_public_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody<'_>,
    ) -> Result<(), StorageError>;
}

pub struct S3StorageService {
    client: Client,
}

impl S3StorageService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let res = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) => Err(classify_head_error(bucket, key, e)),
        }
    }

    async fn put_public_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody<'_>,
    ) -> Result<(), StorageError> {
        let mut data = Vec::new();
        body.read_to_end(&mut data)
            .await
            .map_err(|e| StorageError::Body {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("PutObject s3://{}/{} ({} bytes)", bucket, key, data.len());

        let res = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data))
            .send()
            .await;

        if let Err(e) = res {
            tracing::error!(
                "S3 put_object failed: bucket={}, key={}, error={}",
                bucket,
                key,
                DisplayErrorContext(&e)
            );
            return Err(classify_sdk_error("PutObject", bucket, key, e));
        }
        Ok(())
    }
}

fn classify_head_error(
    bucket: &str,
    key: &str,
    err: SdkError<HeadObjectError, HttpResponse>,
) -> StorageError {
    match err {
        SdkError::ServiceError(e) if e.err().is_not_found() => StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        err => classify_sdk_error("HeadObject", bucket, key, err),
    }
}

fn classify_sdk_error<E>(
    operation: &'static str,
    bucket: &str,
    key: &str,
    err: SdkError<E, HttpResponse>,
) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let code = match &err {
        SdkError::ServiceError(e) => e.err().code().map(str::to_string),
        _ => None,
    };
    let message = DisplayErrorContext(&err).to_string();

    if status == Some(403) || matches!(code.as_deref(), Some("AccessDenied" | "Forbidden")) {
        return StorageError::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };
    }

    StorageError::Transport {
        operation,
        bucket: bucket.to_string(),
        key: key.to_string(),
        message,
    }
}
