//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of stderr bytes kept on a failed conversion.
const MAX_STDERR_LEN: usize = 400;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Converter binary not found.
    #[error("Converter not found at path: {path}")]
    BinaryNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Output directory does not exist.
    #[error("Output directory not found: {path}")]
    OutputDirectoryMissing { path: PathBuf },

    /// Conversion process failed.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Conversion timed out.
    #[error("Conversion timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The converter version could not be determined.
    #[error("Unrecognized converter version output: {output}")]
    UnknownVersion { output: String },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error, truncating long stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr: stderr.map(truncate_stderr),
        }
    }
}

fn truncate_stderr(mut stderr: String) -> String {
    if stderr.len() > MAX_STDERR_LEN {
        let mut cut = MAX_STDERR_LEN;
        while !stderr.is_char_boundary(cut) {
            cut -= 1;
        }
        stderr.truncate(cut);
        stderr.push_str("...");
    }
    stderr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_is_truncated() {
        let err = ConverterError::conversion_failed("exit 1", Some("x".repeat(1000)));
        match err {
            ConverterError::ConversionFailed { stderr: Some(s), .. } => {
                assert_eq!(s.len(), MAX_STDERR_LEN + 3);
                assert!(s.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let err = ConverterError::conversion_failed("exit 1", Some("é".repeat(300)));
        assert!(matches!(err, ConverterError::ConversionFailed { stderr: Some(_), .. }));
    }
}
