//! Target resolution: which files convert, where the output goes, and
//! which outputs already exist.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::filesystem::FileSystem;

use super::types::{ExtensionMap, FileRecord};

/// Fills in target information for every record with a mapped extension.
///
/// A record whose target already exists is marked skipped, so a re-run never
/// overwrites earlier output. Returns the number of eligible records.
pub async fn resolve_targets<F>(fs: &F, records: &mut [FileRecord], extensions: &ExtensionMap) -> usize
where
    F: FileSystem + ?Sized,
{
    let mut eligible = 0;

    for record in records.iter_mut() {
        let Some(target_ext) = extensions.target_for(&record.source_ext) else {
            continue;
        };
        let Some(target) = target_path(&record.source, target_ext) else {
            continue;
        };

        record.source_size = match fs.file_size(&record.source).await {
            Ok(size) => size,
            Err(e) => {
                warn!(source = %record.source.display(), error = %e, "Failed to read source size");
                0
            }
        };
        record.target_ext = target_ext.to_string();
        record.folder = record
            .source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        record.skipped = fs.exists(&target).await;

        debug!(
            source = %record.source.display(),
            target = %target.display(),
            skipped = record.skipped,
            "Resolved target"
        );
        record.target = Some(target);
        eligible += 1;
    }

    let skipped = records.iter().filter(|r| r.skipped).count();
    info!(eligible, skipped, "Target resolution complete");

    eligible
}

/// `<folder>/<stem>.<target_ext>` for a source path.
pub fn target_path(source: &Path, target_ext: &str) -> Option<std::path::PathBuf> {
    let stem = source.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(target_ext.trim_start_matches('.'));
    Some(source.with_file_name(name))
}
