//! Processor module for the folder conversion pipeline.
//!
//! This module provides the `ConvertPipeline` which runs, in order:
//! - Discovery: one `FileRecord` per file in the folder
//! - Target resolution: target path per mapped extension, skip if it exists
//! - Conversion: one converter call per remaining file, bounded in parallel
//! - Verification: a target missing on disk fails the file
//! - Cleanup: sources of confirmed conversions are deleted
//! - Report: `RunSummary` and, in debug mode, the per-file table
//!
//! # Example
//!
//! ```ignore
//! use odfmigrate_core::converter::{ConverterConfig, SofficeConverter};
//! use odfmigrate_core::filesystem::LocalFs;
//! use odfmigrate_core::processor::{ConvertPipeline, ProcessorConfig};
//!
//! let converter = SofficeConverter::new(ConverterConfig::default());
//! let pipeline = ConvertPipeline::new(ProcessorConfig::default(), converter, LocalFs::new());
//!
//! let outcome = pipeline.run(Path::new("/home/me/old-docs")).await?;
//! println!("{}", outcome.summary.render_text());
//! ```

mod cleanup;
mod config;
mod discovery;
mod error;
mod pipeline;
mod resolver;
mod runner;
mod types;
mod verifier;

pub use cleanup::remove_converted_sources;
pub use config::ProcessorConfig;
pub use discovery::discover;
pub use error::PipelineError;
pub use pipeline::{ConvertPipeline, PipelineOutcome};
pub use resolver::{resolve_targets, target_path};
pub use runner::run_conversions;
pub use types::{ExtensionMap, ExtensionRule, FailureKind, FileRecord, PipelineProgress};
pub use verifier::verify_outputs;
