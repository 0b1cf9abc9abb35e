//! Removal of sources whose conversion is confirmed.

use tracing::{debug, info, warn};

use crate::filesystem::FileSystem;

use super::types::FileRecord;

/// Deletes the source of every record with a positive target size.
///
/// Skipped, failed and ineligible records always keep their source.
/// Returns the number of deleted files.
pub async fn remove_converted_sources<F>(fs: &F, records: &[FileRecord]) -> usize
where
    F: FileSystem + ?Sized,
{
    let mut deleted = 0;

    for record in records.iter().filter(|r| r.is_converted()) {
        match fs.remove_file(&record.source).await {
            Ok(()) => {
                debug!(source = %record.source.display(), "Deleted source");
                deleted += 1;
            }
            Err(e) => {
                warn!(source = %record.source.display(), error = %e, "Failed to delete source");
            }
        }
    }

    info!(deleted, "Cleanup complete");
    deleted
}
