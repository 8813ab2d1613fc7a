use std::path::PathBuf;
use thiserror::Error;

pub const HELP_TEXT: &str = "s3share [file]

Uploads files to an S3 bucket specified in the environment variable S3SHARE_BUCKET.";

#[derive(Error, Debug)]
pub enum ShareError {
    /// Not enough arguments. The message doubles as help output.
    #[error("{0}")]
    Usage(String),

    /// `--help`, `--version` or a malformed flag, rendered by clap.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("{name} environment variable not set.")]
    ConfigMissing { name: &'static str },

    #[error("failed to set up storage client: {0}")]
    ClientSetup(String),

    #[error("file does not exist or cannot be read: {}", path.display())]
    FileUnreadable { path: PathBuf },

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("failed to rewind {}: {source}", path.display())]
    Rewind {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled,
}

/// Reading the content stream failed while computing its fingerprint.
#[derive(Error, Debug)]
#[error("error computing file hash: {0}")]
pub struct HashError(#[from] pub std::io::Error);

/// Errors reported by an object store.
///
/// `NotFound` is only ever produced by the existence check; the existence
/// oracle turns it into `Ok(false)` so it never reaches the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("{operation} s3://{bucket}/{key} failed: {message}")]
    Transport {
        operation: &'static str,
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to read upload body for s3://{bucket}/{key}: {message}")]
    Body {
        bucket: String,
        key: String,
        message: String,
    },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
