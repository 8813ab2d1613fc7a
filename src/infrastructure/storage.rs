use crate::config::ShareConfig;
use crate::error::ShareError;
use crate::services::storage::{S3StorageService, StorageService};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{ProvideCredentials, Region};
use std::sync::Arc;
use tracing::info;

const FALLBACK_REGION: &str = "us-east-1";

/// Builds the storage client shared by every upload of a run.
#[async_trait]
pub trait StorageConnector: Send + Sync {
    async fn connect(&self, config: &ShareConfig) -> Result<Arc<dyn StorageService>, ShareError>;
}

/// Connects to S3 with the AWS SDK's default credential and region chains.
pub struct S3Connector;

#[async_trait]
impl StorageConnector for S3Connector {
    async fn connect(&self, config: &ShareConfig) -> Result<Arc<dyn StorageService>, ShareError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let aws_config = loader.load().await;

        let Some(credentials_provider) = aws_config.credentials_provider() else {
            return Err(ShareError::ClientSetup(
                "no AWS credentials provider found".to_string(),
            ));
        };
        credentials_provider
            .provide_credentials()
            .await
            .map_err(|e| ShareError::ClientSetup(format!("failed to load AWS credentials: {}", e)))?;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);
        if aws_config.region().is_none() {
            s3_config = s3_config.region(Region::new(FALLBACK_REGION));
        }
        if config.endpoint_url.is_some() {
            s3_config = s3_config.force_path_style(true);
        }

        info!(
            "☁️  S3 Storage: {} (Bucket: {})",
            config.endpoint_url.as_deref().unwrap_or("aws"),
            config.bucket
        );

        let s3_client = aws_sdk_s3::Client::from_conf(s3_config.build());
        Ok(Arc::new(S3StorageService::new(s3_client)))
    }
}
