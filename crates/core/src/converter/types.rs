//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single document conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    /// Identifier used in logs and progress events.
    pub job_id: String,
    /// Document to convert.
    pub input_path: PathBuf,
    /// Target format as the converter understands it (e.g. "odt"), no leading dot.
    pub target_format: String,
    /// Directory the converter writes into.
    pub output_dir: PathBuf,
}

impl ConversionJob {
    /// Creates a job, stripping a leading dot from the target format.
    pub fn new(
        job_id: impl Into<String>,
        input_path: impl Into<PathBuf>,
        target_format: &str,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            input_path: input_path.into(),
            target_format: target_format.trim_start_matches('.').to_string(),
            output_dir: output_dir.into(),
        }
    }

    /// Path the converter is expected to produce: `<output_dir>/<stem>.<format>`.
    pub fn expected_output(&self) -> Option<PathBuf> {
        let stem = self.input_path.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.target_format);
        Some(self.output_dir.join(name))
    }
}

/// Result of a conversion the converter reported as successful.
///
/// A successful result does not guarantee the output exists on disk;
/// callers verify that separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Job identifier.
    pub job_id: String,
    /// Where the output is expected.
    pub output_path: Option<PathBuf>,
    /// Wall-clock time of the conversion in milliseconds.
    pub duration_ms: u64,
}
