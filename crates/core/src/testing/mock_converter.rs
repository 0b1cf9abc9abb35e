//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConversionJob, ConversionResult, Converter, ConverterError};

/// How the mock handles a given input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Write an output file of `output_size` bytes and report success.
    Succeed { output_size: usize },
    /// Report a failed conversion without writing anything.
    Fail { reason: String },
    /// Report a timeout without writing anything.
    Timeout,
    /// Report success without writing anything.
    NoOutput,
}

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion reported success.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Per-file success, failure, timeout or silent no-op
/// - Writes real output files next to the input, like soffice does
/// - Tracks how many conversions ran at once
///
/// # Example
///
/// ```rust,ignore
/// use odfmigrate_core::testing::{MockBehavior, MockConverter};
///
/// let converter = MockConverter::new();
/// converter.set_behavior("broken.doc", MockBehavior::Fail { reason: "corrupt".into() }).await;
///
/// let pipeline = ConvertPipeline::new(config, converter.clone(), LocalFs::new());
/// pipeline.run(dir.path()).await?;
///
/// assert_eq!(converter.conversion_count().await, 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Behavior by input file name.
    behaviors: Arc<RwLock<HashMap<String, MockBehavior>>>,
    /// Output size for files without a configured behavior.
    output_size: Arc<RwLock<usize>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Simulated conversion duration.
    conversion_duration: Arc<RwLock<Duration>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter that succeeds with 100-byte outputs.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            behaviors: Arc::new(RwLock::new(HashMap::new())),
            output_size: Arc::new(RwLock::new(100)),
            next_error: Arc::new(RwLock::new(None)),
            conversion_duration: Arc::new(RwLock::new(Duration::ZERO)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Clear recorded conversions.
    pub async fn clear_recorded(&self) {
        self.conversions.write().await.clear();
    }

    /// Get the number of conversions performed.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Set the behavior for an input file name, e.g. "report.doc".
    pub async fn set_behavior(&self, file_name: &str, behavior: MockBehavior) {
        self.behaviors
            .write()
            .await
            .insert(file_name.to_string(), behavior);
    }

    /// Set the output size for files without a configured behavior.
    pub async fn set_output_size(&self, size: usize) {
        *self.output_size.write().await = size;
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration.write().await = duration;
    }

    /// Highest number of conversions that ran at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }

    async fn behavior_for(&self, job: &ConversionJob) -> MockBehavior {
        let name = job
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match self.behaviors.read().await.get(&name) {
            Some(behavior) => behavior.clone(),
            None => MockBehavior::Succeed {
                output_size: *self.output_size.read().await,
            },
        }
    }

    async fn simulate(&self, job: &ConversionJob) -> Result<ConversionResult, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let duration = *self.conversion_duration.read().await;
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }

        let output_path = job.expected_output();
        match self.behavior_for(job).await {
            MockBehavior::Succeed { output_size } => {
                if let Some(ref path) = output_path {
                    tokio::fs::write(path, vec![0u8; output_size]).await?;
                }
            }
            MockBehavior::Fail { reason } => {
                return Err(ConverterError::conversion_failed(reason, None));
            }
            MockBehavior::Timeout => {
                return Err(ConverterError::Timeout { timeout_secs: 1 });
            }
            MockBehavior::NoOutput => {}
        }

        Ok(ConversionResult {
            job_id: job.job_id.clone(),
            output_path,
            duration_ms: duration.as_millis() as u64,
        })
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = self.simulate(&job).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.conversions.write().await.push(RecordedConversion {
            job,
            success: result.is_ok(),
        });
        result
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(dir: &TempDir, name: &str, format: &str) -> ConversionJob {
        let input = dir.path().join(name);
        std::fs::write(&input, b"legacy").unwrap();
        ConversionJob::new(name, input, format, dir.path())
    }

    #[tokio::test]
    async fn test_default_success_writes_output() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        converter.set_output_size(42).await;

        let result = converter.convert(job(&dir, "a.doc", "odt")).await.unwrap();

        let output = dir.path().join("a.odt");
        assert_eq!(result.output_path, Some(output.clone()));
        assert_eq!(std::fs::metadata(output).unwrap().len(), 42);
    }

    #[tokio::test]
    async fn test_behaviors() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        converter
            .set_behavior("bad.doc", MockBehavior::Fail { reason: "corrupt".to_string() })
            .await;
        converter.set_behavior("quiet.xls", MockBehavior::NoOutput).await;

        assert!(converter.convert(job(&dir, "bad.doc", "odt")).await.is_err());
        assert!(converter.convert(job(&dir, "quiet.xls", "ods")).await.is_ok());
        assert!(!dir.path().join("bad.odt").exists());
        assert!(!dir.path().join("quiet.ods").exists());

        let conversions = converter.recorded_conversions().await;
        assert_eq!(conversions.len(), 2);
        assert!(!conversions[0].success);
        assert!(conversions[1].success);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let converter = MockConverter::new();
        converter
            .set_next_error(ConverterError::BinaryNotFound {
                path: "soffice".into(),
            })
            .await;

        assert!(converter.validate().await.is_err());
        // Error should be consumed
        assert!(converter.validate().await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        let handle = converter.clone();

        converter.convert(job(&dir, "a.doc", "odt")).await.unwrap();

        assert_eq!(handle.conversion_count().await, 1);
        handle.clear_recorded().await;
        assert_eq!(converter.conversion_count().await, 0);
        assert_eq!(converter.peak_in_flight(), 1);
    }
}
