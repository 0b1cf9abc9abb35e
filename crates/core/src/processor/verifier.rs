//! Output verification, independent of what the converter reported.

use tracing::{info, warn};

use crate::filesystem::FileSystem;

use super::types::{FailureKind, FileRecord};

/// Marks every converted record whose target is absent as failed.
///
/// Skipped records are left alone: their target existed before the run.
/// Returns the number of records newly marked as failed.
pub async fn verify_outputs<F>(fs: &F, records: &mut [FileRecord]) -> usize
where
    F: FileSystem + ?Sized,
{
    let mut missing = 0;

    for record in records.iter_mut().filter(|r| r.needs_conversion()) {
        let Some(target) = record.target.as_deref() else {
            continue;
        };
        if fs.exists(target).await {
            continue;
        }

        if !record.is_failed() {
            warn!(
                source = %record.source.display(),
                target = %target.display(),
                "Converter reported success but the target is missing"
            );
            missing += 1;
        }
        record.mark_failed(FailureKind::OutputMissing);
    }

    let failed = records.iter().filter(|r| r.is_failed()).count();
    info!(failed, missing_outputs = missing, "Output verification complete");

    missing
}
