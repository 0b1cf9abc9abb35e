//! Aggregation over the final file records.

use serde::{Deserialize, Serialize};

use crate::processor::FileRecord;

/// Counts and byte totals for one run.
///
/// Byte totals only cover processed files: eligible, not skipped, not failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Every discovered file, eligible or not.
    pub total: usize,
    /// Files with a mapped extension.
    pub eligible: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Size of the processed sources.
    pub source_bytes: u64,
    /// Size of their conversions.
    pub target_bytes: u64,
}

impl RunStats {
    pub fn from_records(records: &[FileRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut stats, record| {
                if record.is_eligible() {
                    stats.eligible += 1;
                }
                if record.skipped {
                    stats.skipped += 1;
                }
                if record.is_failed() {
                    stats.failed += 1;
                }
                if record.is_processed() {
                    stats.processed += 1;
                    stats.source_bytes += record.source_size;
                    stats.target_bytes += record.target_size;
                }
                stats
            },
        )
    }

    /// Bytes saved; negative when the conversions grew.
    pub fn bytes_saved(&self) -> i64 {
        self.source_bytes as i64 - self.target_bytes as i64
    }

    pub fn compression_percent(&self) -> i64 {
        compression_percent(self.source_bytes, self.target_bytes)
    }
}

/// `round(100 * (source - target) / source)`, or 0 when `source` is 0.
pub fn compression_percent(source_bytes: u64, target_bytes: u64) -> i64 {
    if source_bytes == 0 {
        return 0;
    }
    let diff = source_bytes as f64 - target_bytes as f64;
    (100.0 * diff / source_bytes as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::FailureKind;
    use std::path::PathBuf;

    fn eligible(name: &str, source_size: u64, target_size: u64) -> FileRecord {
        let mut record = FileRecord::new(format!("/docs/{}", name));
        record.target = Some(PathBuf::from("/docs/out"));
        record.source_size = source_size;
        record.target_size = target_size;
        record
    }

    #[test]
    fn test_compression_percent() {
        assert_eq!(compression_percent(0, 0), 0);
        assert_eq!(compression_percent(0, 100), 0);
        assert_eq!(compression_percent(1000, 400), 60);
        assert_eq!(compression_percent(1000, 1000), 0);
        assert_eq!(compression_percent(100, 150), -50);
        assert_eq!(compression_percent(3, 2), 33);
    }

    #[test]
    fn test_from_records() {
        let ok = eligible("a.doc", 500, 200);

        let mut skipped = eligible("b.xls", 300, 0);
        skipped.skipped = true;

        let mut failed = eligible("c.doc", 700, 0);
        failed.mark_failed(FailureKind::OutputMissing);

        let other = FileRecord::new("/docs/notes.txt");

        let stats = RunStats::from_records(&[ok, skipped, failed, other]);

        assert_eq!(
            stats,
            RunStats {
                total: 4,
                eligible: 3,
                processed: 1,
                skipped: 1,
                failed: 1,
                source_bytes: 500,
                target_bytes: 200,
            }
        );
        assert_eq!(stats.compression_percent(), 60);
        assert_eq!(stats.bytes_saved(), 300);
        assert!(stats.processed + stats.skipped + stats.failed <= stats.total);
    }

    #[test]
    fn test_empty_records() {
        let stats = RunStats::from_records(&[]);
        assert_eq!(stats, RunStats::default());
        assert_eq!(stats.compression_percent(), 0);
    }
}
