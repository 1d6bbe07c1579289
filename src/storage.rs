use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::io::AsyncWrite;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Writable stream handed out by [`FileSystemAccessor::open_write_stream`].
/// Dropping it closes the underlying file.
pub type WriteStream = Box<dyn AsyncWrite + Send + Unpin>;

/// Filesystem operations used by the downloader.
///
/// Shared by every page and resource task, so implementations must tolerate
/// concurrent calls for different paths.
#[async_trait]
pub trait FileSystemAccessor: Send + Sync {
    /// Create `path` and any missing parents; succeeds if it already exists
    fn create_folder(&self, path: &Path) -> io::Result<()>;

    /// Write `content` to `path`, replacing any existing file
    async fn save_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Create or truncate `path` for exclusive writing
    async fn open_write_stream(&self, path: &Path) -> io::Result<WriteStream>;
}

/// [`FileSystemAccessor`] over the local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystemAccessor for LocalFileSystem {
    fn create_folder(&self, path: &Path) -> io::Result<()> {
        // Blocking call; let a multi-threaded runtime move other tasks off this worker
        match Handle::try_current().map(|handle| handle.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => {
                tokio::task::block_in_place(|| std::fs::create_dir_all(path))
            }
            _ => std::fs::create_dir_all(path),
        }
    }

    async fn save_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, content).await
    }

    async fn open_write_stream(&self, path: &Path) -> io::Result<WriteStream> {
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await?;
        Ok(Box::new(file))
    }
}
