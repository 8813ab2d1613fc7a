pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::config::{Environment, ProcessEnvironment, ShareConfig};
pub use crate::error::{ShareError, StorageError};
pub use crate::infrastructure::storage::{S3Connector, StorageConnector};
pub use crate::models::{ContentFingerprint, StorageKey, UploadOutcome, UploadRequest};
pub use crate::services::file_system::{FileHandle, FileStat, FileSystem, LocalFileSystem};
pub use crate::services::share_service::ShareService;
pub use crate::services::storage::StorageService;
pub use crate::services::upload_service::UploadService;
