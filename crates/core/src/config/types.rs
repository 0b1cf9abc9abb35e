use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::processor::ProcessorConfig;
use crate::report::ReportConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub processor: ProcessorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}
