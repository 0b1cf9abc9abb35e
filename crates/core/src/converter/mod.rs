//! Converter module for turning legacy office documents into OpenDocument files.
//!
//! This module provides the `Converter` trait and the `SofficeConverter`
//! implementation, which runs a headless LibreOffice once per document.
//!
//! # Example
//!
//! ```ignore
//! use odfmigrate_core::converter::{ConversionJob, Converter, ConverterConfig, SofficeConverter};
//!
//! let converter = SofficeConverter::new(ConverterConfig::default());
//!
//! // Make sure soffice is installed
//! converter.validate().await?;
//!
//! let job = ConversionJob::new("job-1", "/docs/report.doc", "odt", "/docs");
//! let result = converter.convert(job).await?;
//! println!("Converted in {} ms", result.duration_ms);
//! ```

mod config;
mod error;
mod soffice;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use soffice::SofficeConverter;
pub use traits::Converter;
pub use types::{ConversionJob, ConversionResult};
