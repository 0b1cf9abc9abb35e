//! Discovery: one `FileRecord` per file in the target folder.

use std::path::Path;
use tracing::{debug, info};

use crate::filesystem::FileSystem;

use super::error::PipelineError;
use super::types::FileRecord;

/// Lists the immediate files of `folder` in listing order.
///
/// An unreadable or empty folder ends the run.
pub async fn discover<F>(fs: &F, folder: &Path) -> Result<Vec<FileRecord>, PipelineError>
where
    F: FileSystem + ?Sized,
{
    let files = fs
        .list_files(folder)
        .await
        .map_err(|source| PipelineError::FolderUnreadable {
            path: folder.to_path_buf(),
            source,
        })?;

    if files.is_empty() {
        return Err(PipelineError::NoInputFiles {
            path: folder.to_path_buf(),
        });
    }

    let records: Vec<FileRecord> = files.into_iter().map(FileRecord::new).collect();
    for record in &records {
        debug!(source = %record.source.display(), ext = %record.source_ext, "Discovered file");
    }
    info!(folder = %folder.display(), files = records.len(), "Discovery complete");

    Ok(records)
}
