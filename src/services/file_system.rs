use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncSeek};

/// Seekable read handle. Dropping it releases the underlying file.
pub trait FileHandle: AsyncRead + AsyncSeek + Unpin + Send {}

impl<T: AsyncRead + AsyncSeek + Unpin + Send> FileHandle for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub len: u64,
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;
    async fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>>;
}

pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            len: metadata.len(),
        })
    }

    async fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }
}
