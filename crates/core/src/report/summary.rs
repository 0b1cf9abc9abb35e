//! The end-of-run summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

use crate::processor::{FailureKind, FileRecord};

use super::format::{format_bytes, format_duration, format_signed_bytes};
use super::stats::RunStats;

/// A file whose conversion failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub reason: FailureKind,
}

/// Everything reported at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub folder: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: RunStats,
    pub compression_percent: i64,
    /// Sources removed after conversion.
    pub deleted: usize,
    pub elapsed_ms: u64,
    pub failures: Vec<FailedFile>,
}

impl RunSummary {
    /// Builds the summary from the final records.
    pub fn new(
        run_id: Uuid,
        folder: &Path,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        records: &[FileRecord],
        deleted: usize,
    ) -> Self {
        let stats = RunStats::from_records(records);
        let failures = records
            .iter()
            .filter_map(|record| {
                record.failure.clone().map(|reason| FailedFile {
                    source: record.source.clone(),
                    reason,
                })
            })
            .collect();

        Self {
            run_id,
            folder: folder.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            stats,
            compression_percent: stats.compression_percent(),
            deleted,
            elapsed_ms: elapsed.as_millis() as u64,
            failures,
        }
    }

    /// The eight report lines, in fixed order.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Files in total: {}", self.stats.total),
            format!("Processed files: {}", self.stats.processed),
            format!("Skipped files: {}", self.stats.skipped),
            format!("Failed files: {}", self.stats.failed),
            format!("Processed data: {}", format_bytes(self.stats.source_bytes)),
            format!("Converted data: {}", format_bytes(self.stats.target_bytes)),
            format!(
                "Compression: {} ({}%)",
                format_signed_bytes(self.stats.bytes_saved()),
                self.compression_percent
            ),
            format!(
                "The operation has taken {}",
                format_duration(Duration::from_millis(self.elapsed_ms))
            ),
        ]
    }

    pub fn render_text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
