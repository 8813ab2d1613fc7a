use crate::models::{ContentFingerprint, StorageKey};
use std::path::Path;

/// Last component of `path`, with directories stripped.
///
/// Paths without a normal final component (`..`, `/`) are kept whole.
/// Non UTF-8 names are converted lossily.
pub fn basename(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

pub fn derive_key(fingerprint: &ContentFingerprint, basename: &str) -> StorageKey {
    StorageKey::from_parts(fingerprint, basename)
}

pub fn derive_key_for_path(fingerprint: &ContentFingerprint, path: &Path) -> StorageKey {
    derive_key(fingerprint, &basename(path))
}

/// Public URL of an object in a virtual-hosted S3 bucket.
pub fn object_url(bucket: &str, key: &StorageKey) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}
