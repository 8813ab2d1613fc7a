use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// One file to share, created per CLI argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    pub bucket: String,
}

impl UploadRequest {
    pub fn new(file_path: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            bucket: bucket.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// SHA-256 digest of a file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// URL-safe base64 without padding, safe to use as a URL path segment.
    pub fn to_url_safe(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_safe())
    }
}

/// Object key of the form `<url-safe-base64-fingerprint>/<basename>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub(crate) fn from_parts(fingerprint: &ContentFingerprint, basename: &str) -> Self {
        Self(format!("{}/{}", fingerprint.to_url_safe(), basename))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of sharing one file.
///
/// `transferred` is false when the object was already present and no bytes
/// were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub url: String,
    pub key: StorageKey,
    pub transferred: bool,
}
