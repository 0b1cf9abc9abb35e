//! Error types for the processor module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a pipeline run before any conversion happens.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The folder could not be listed.
    #[error("Cannot read folder {path}: {source}")]
    FolderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The folder holds no files at all.
    #[error("No input files found in {path}")]
    NoInputFiles { path: PathBuf },
}

impl PipelineError {
    /// Whether the folder itself was unusable, as opposed to merely empty.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::FolderUnreadable { .. })
    }
}
