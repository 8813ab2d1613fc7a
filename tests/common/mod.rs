#![allow(dead_code)]

use async_trait::async_trait;
use s3share::config::Environment;
use s3share::error::{ShareError, StorageError};
use s3share::infrastructure::storage::StorageConnector;
use s3share::services::file_system::{FileHandle, FileStat, FileSystem};
use s3share::services::storage::{ObjectBody, StorageService};
use s3share::ShareConfig;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io::{self, Cursor, SeekFrom};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, ReadBuf};

// ---------------------------------------------------------------------------
// Object store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockStorageService {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    pub head_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    head_error: Mutex<Option<StorageError>>,
    put_error: Mutex<Option<StorageError>>,
}

impl MockStorageService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_head_with(&self, err: StorageError) {
        *self.head_error.lock().unwrap() = Some(err);
    }

    pub fn fail_put_with(&self, err: StorageError) {
        *self.put_error.lock().unwrap() = Some(err);
    }

    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, key), data.to_vec());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&format!("{}/{}", bucket, key))
            .cloned()
    }

    pub fn heads(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.head_error.lock().unwrap().clone() {
            return Err(err);
        }
        if self.object(bucket, key).is_some() {
            Ok(())
        } else {
            Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
        }
    }

    async fn put_public_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody<'_>,
    ) -> Result<(), StorageError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let put_error = self.put_error.lock().unwrap().clone();
        if let Some(err) = put_error {
            return Err(err);
        }
        let mut data = Vec::new();
        body.read_to_end(&mut data)
            .await
            .map_err(|e| StorageError::Body {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;
        self.insert(bucket, key, &data);
        Ok(())
    }
}

pub fn transport_error(message: &str) -> StorageError {
    StorageError::Transport {
        operation: "HeadObject",
        bucket: "somebucket".to_string(),
        key: "key".to_string(),
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// File system
// ---------------------------------------------------------------------------

/// In-memory file handle that counts how often it is released.
pub struct TrackedHandle {
    inner: Cursor<Vec<u8>>,
    fail_read: bool,
    fail_seek: bool,
    released: Arc<AtomicUsize>,
}

impl AsyncRead for TrackedHandle {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.fail_read {
            return Poll::Ready(Err(io::Error::other("injected read failure")));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncSeek for TrackedHandle {
    fn start_seek(mut self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        if self.fail_seek {
            return Err(io::Error::other("injected seek failure"));
        }
        Pin::new(&mut self.inner).start_seek(position)
    }

    fn poll_complete(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Pin::new(&mut self.inner).poll_complete(cx)
    }
}

impl Drop for TrackedHandle {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
    fail_open: HashSet<PathBuf>,
    fail_read: HashSet<PathBuf>,
    fail_seek: HashSet<PathBuf>,
    stat_log: Mutex<Vec<PathBuf>>,
    opened: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, data: &[u8]) -> Self {
        self.with_file_at(PathBuf::from(path), data)
    }

    pub fn with_file_at(mut self, path: impl Into<PathBuf>, data: &[u8]) -> Self {
        self.files.insert(path.into(), data.to_vec());
        self
    }

    pub fn failing_open(mut self, path: &str) -> Self {
        self.fail_open.insert(PathBuf::from(path));
        self
    }

    pub fn failing_read(mut self, path: &str) -> Self {
        self.fail_read.insert(PathBuf::from(path));
        self
    }

    pub fn failing_seek(mut self, path: &str) -> Self {
        self.fail_seek.insert(PathBuf::from(path));
        self
    }

    pub fn stat_log(&self) -> Vec<PathBuf> {
        self.stat_log.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        self.stat_log.lock().unwrap().push(path.to_path_buf());
        match self.files.get(path) {
            Some(data) => Ok(FileStat {
                len: data.len() as u64,
            }),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }

    async fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>> {
        if self.fail_open.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        let data = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedHandle {
            inner: Cursor::new(data),
            fail_read: self.fail_read.contains(path),
            fail_seek: self.fail_seek.contains(path),
            released: self.released.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Process environment and client bootstrap
// ---------------------------------------------------------------------------

pub struct MockEnvironment {
    args: Vec<OsString>,
    vars: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl MockEnvironment {
    pub fn new(args: &[&str]) -> Self {
        Self::from_os_args(args.iter().map(OsString::from).collect())
    }

    pub fn from_os_args(args: Vec<OsString>) -> Self {
        Self {
            args,
            vars: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Environment for MockEnvironment {
    fn args(&self) -> Vec<OsString> {
        self.args.clone()
    }

    fn var(&self, name: &str) -> Option<String> {
        self.lookups.lock().unwrap().push(name.to_string());
        self.vars.get(name).cloned()
    }
}

pub struct MockConnector {
    storage: Arc<MockStorageService>,
    failure: Option<String>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(storage: Arc<MockStorageService>) -> Self {
        Self {
            storage,
            failure: None,
            connects: AtomicUsize::new(0),
        }
    }

    pub fn failing(storage: Arc<MockStorageService>, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(storage)
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageConnector for MockConnector {
    async fn connect(&self, _config: &ShareConfig) -> Result<Arc<dyn StorageService>, ShareError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(ShareError::ClientSetup(message.clone()));
        }
        Ok(self.storage.clone())
    }
}
