//! Types for the processor module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::converter::ConverterError;

/// Why a conversion attempt counts as failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The converter could not be started or reported an error.
    Converter { reason: String },
    /// The converter did not finish in time and was killed.
    Timeout { timeout_secs: u64 },
    /// The converter reported success but no output file exists.
    OutputMissing,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converter { reason } => write!(f, "{}", reason),
            Self::Timeout { timeout_secs } => {
                write!(f, "timed out after {} seconds", timeout_secs)
            }
            Self::OutputMissing => write!(f, "converter produced no output"),
        }
    }
}

impl From<&ConverterError> for FailureKind {
    fn from(err: &ConverterError) -> Self {
        match err {
            ConverterError::Timeout { timeout_secs } => Self::Timeout {
                timeout_secs: *timeout_secs,
            },
            other => Self::Converter {
                reason: other.to_string(),
            },
        }
    }
}

/// State of one discovered file as it moves through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Absolute path of the input file.
    pub source: PathBuf,
    /// Lower-cased extension of the source, without the dot.
    pub source_ext: String,
    /// Output path; `None` when the file is not eligible for conversion.
    pub target: Option<PathBuf>,
    /// Extension of the target, without the dot.
    pub target_ext: String,
    /// Directory holding both source and target.
    pub folder: PathBuf,
    /// Source size in bytes.
    pub source_size: u64,
    /// Target size in bytes; stays 0 until a conversion is confirmed.
    pub target_size: u64,
    /// The target already existed before conversion.
    pub skipped: bool,
    /// Set when a conversion attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl FileRecord {
    /// Creates a record for a discovered file.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let source_ext = extension_of(&source);
        Self {
            source,
            source_ext,
            ..Default::default()
        }
    }

    /// Whether the file has a target and takes part in conversion.
    pub fn is_eligible(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Eligible, not skipped and not failed.
    pub fn is_processed(&self) -> bool {
        self.is_eligible() && !self.skipped && !self.is_failed()
    }

    /// Whether the converter still has to run for this file.
    pub fn needs_conversion(&self) -> bool {
        self.is_eligible() && !self.skipped
    }

    /// Whether the conversion is confirmed and the source may go.
    pub fn is_converted(&self) -> bool {
        self.target_size > 0
    }

    /// Records a failure, keeping the first reason if one is already set.
    pub fn mark_failed(&mut self, kind: FailureKind) {
        if self.failure.is_none() {
            self.failure = Some(kind);
        }
        self.target_size = 0;
    }
}

/// Lower-cased extension without the leading dot, or "" when absent.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// One source-to-target extension pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRule {
    /// Legacy extension, e.g. "doc".
    pub source: String,
    /// Format to convert into, e.g. "odt".
    pub target: String,
}

impl ExtensionRule {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: normalize_ext(source),
            target: normalize_ext(target),
        }
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Ordered mapping from legacy extensions to their target formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionMap {
    rules: Vec<ExtensionRule>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::new(vec![
            ExtensionRule::new("doc", "odt"),
            ExtensionRule::new("xls", "ods"),
        ])
    }
}

impl ExtensionMap {
    pub fn new(rules: Vec<ExtensionRule>) -> Self {
        Self { rules }
    }

    /// Target extension for a source extension; case and leading dot are ignored.
    pub fn target_for(&self, source_ext: &str) -> Option<&str> {
        let wanted = normalize_ext(source_ext);
        self.rules
            .iter()
            .find(|rule| normalize_ext(&rule.source) == wanted)
            .map(|rule| rule.target.trim_start_matches('.'))
    }

    pub fn rules(&self) -> &[ExtensionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Progress events emitted while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineProgress {
    /// Discovery finished.
    Discovered { total_files: usize, eligible: usize, skipped: usize },
    /// A conversion started.
    Converting { source: PathBuf, index: usize, total: usize },
    /// A conversion finished and the target size was read.
    Converted { source: PathBuf, target_size: u64 },
    /// A conversion failed.
    Failed { source: PathBuf, reason: String },
    /// The run is complete.
    Finished { processed: usize, skipped: usize, failed: usize },
}
