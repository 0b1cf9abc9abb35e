use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Converter timeout and parallelism are at least 1
/// - Extension map is non-empty, without duplicates, empty or identity rules
/// - Debug table limits are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.converter.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "converter.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.processor.max_parallel_conversions == 0 {
        return Err(ConfigError::ValidationError(
            "processor.max_parallel_conversions cannot be 0".to_string(),
        ));
    }

    let extensions = &config.processor.extensions;
    if extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "processor.extensions cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for rule in extensions.rules() {
        let source = rule.source.trim_start_matches('.').to_lowercase();
        let target = rule.target.trim_start_matches('.').to_lowercase();
        if source.is_empty() || target.is_empty() {
            return Err(ConfigError::ValidationError(
                "processor.extensions entries need a source and a target".to_string(),
            ));
        }
        if source == target {
            return Err(ConfigError::ValidationError(format!(
                "processor.extensions maps '{}' onto itself",
                source
            )));
        }
        if !seen.insert(source.clone()) {
            return Err(ConfigError::ValidationError(format!(
                "processor.extensions lists '{}' more than once",
                source
            )));
        }
    }

    if config.report.max_rows == 0 {
        return Err(ConfigError::ValidationError(
            "report.max_rows cannot be 0".to_string(),
        ));
    }

    if config.report.max_cell_width < 4 {
        return Err(ConfigError::ValidationError(
            "report.max_cell_width must be at least 4".to_string(),
        ));
    }

    Ok(())
}
