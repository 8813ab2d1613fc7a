use crate::error::HashError;
use crate::models::ContentFingerprint;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_BUFFER_SIZE: usize = 64 * 1024;

pub fn calculate_fingerprint(data: &[u8]) -> ContentFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(data);
    ContentFingerprint::from_bytes(hasher.finalize().into())
}

/// Streams `reader` to exhaustion through SHA-256.
///
/// The reader is left at end of stream; callers that reuse it must seek back.
pub async fn calculate_fingerprint_from_reader<R: AsyncRead + Unpin>(
    mut reader: R,
) -> Result<ContentFingerprint, HashError> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(ContentFingerprint::from_bytes(hasher.finalize().into()))
}
