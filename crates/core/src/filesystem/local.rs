//! Local disk implementation of `FileSystem`.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use super::traits::FileSystem;

/// `FileSystem` backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Creates a new local filesystem handle.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFs {
    fn name(&self) -> &str {
        "local"
    }

    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // Follow symlinks so a link to a document counts as a file
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                // A broken entry is not a regular file; the folder stays readable
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable entry"),
            }
        }

        files.sort();
        Ok(files)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }
}
