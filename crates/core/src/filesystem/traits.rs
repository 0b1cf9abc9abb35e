//! Trait definitions for the filesystem module.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations the pipeline relies on.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Lists the regular files directly inside `dir`, sorted by path.
    ///
    /// Subdirectories are not descended into.
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether any entry exists at `path`.
    async fn exists(&self, path: &Path) -> bool;

    /// Size of the file at `path` in bytes.
    async fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Deletes the file at `path`.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;
}
