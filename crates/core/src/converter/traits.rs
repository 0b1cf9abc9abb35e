//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionResult};

/// An external engine that converts one document per call.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts a document according to the job specification.
    ///
    /// Any existing file at the expected output path may be overwritten.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;
}
