pub mod config;
pub mod converter;
pub mod filesystem;
pub mod processor;
pub mod report;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError,
};
pub use converter::{
    ConversionJob, ConversionResult, Converter, ConverterConfig, ConverterError,
    SofficeConverter,
};
pub use filesystem::{FileSystem, LocalFs};
pub use processor::{
    ConvertPipeline, ExtensionMap, ExtensionRule, FailureKind, FileRecord, PipelineError,
    PipelineOutcome, PipelineProgress, ProcessorConfig,
};
pub use report::{ReportConfig, RunStats, RunSummary};
