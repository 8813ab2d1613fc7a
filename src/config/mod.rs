use crate::error::ShareError;
use std::env;
use std::ffi::OsString;

pub const BUCKET_VAR: &str = "S3SHARE_BUCKET";
pub const ENDPOINT_VAR: &str = "S3SHARE_ENDPOINT";
pub const REGION_VAR: &str = "S3SHARE_REGION";

/// Source of invocation arguments and named configuration values.
pub trait Environment: Send + Sync {
    /// Full argument list, program name first. Arguments are kept as raw OS
    /// strings so file names that are not valid UTF-8 still reach the parser.
    fn args(&self) -> Vec<OsString>;

    fn var(&self, name: &str) -> Option<String>;
}

/// The running process's arguments and environment variables.
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn args(&self) -> Vec<OsString> {
        env::args_os().collect()
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Share configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Destination bucket (required)
    pub bucket: String,

    /// Custom S3-compatible endpoint, e.g. a local MinIO (default: AWS)
    pub endpoint_url: Option<String>,

    /// Region override (default: SDK region chain, then us-east-1)
    pub region: Option<String>,
}

impl ShareConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            endpoint_url: None,
            region: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env(env: &dyn Environment) -> Result<Self, ShareError> {
        let bucket = env
            .var(BUCKET_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ShareError::ConfigMissing { name: BUCKET_VAR })?;

        Ok(Self {
            bucket,
            endpoint_url: non_empty(env.var(ENDPOINT_VAR)),
            region: non_empty(env.var(REGION_VAR)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
