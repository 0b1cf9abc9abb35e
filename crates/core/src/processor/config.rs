//! Configuration for the processor module.

use serde::{Deserialize, Serialize};

use super::types::ExtensionMap;

/// Configuration for the conversion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Which legacy extensions are converted, and into what.
    #[serde(default)]
    pub extensions: ExtensionMap,

    /// Maximum parallel conversions.
    #[serde(default = "default_max_conversions")]
    pub max_parallel_conversions: usize,

    /// Keep source files even after a confirmed conversion.
    #[serde(default)]
    pub keep_sources: bool,

    /// Render the per-file debug table.
    #[serde(default)]
    pub debug: bool,
}

fn default_max_conversions() -> usize {
    1
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            extensions: ExtensionMap::default(),
            max_parallel_conversions: default_max_conversions(),
            keep_sources: false,
            debug: false,
        }
    }
}

impl ProcessorConfig {
    /// Sets the maximum parallel conversions.
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel_conversions = max;
        self
    }

    /// Keeps or deletes sources after conversion.
    pub fn with_keep_sources(mut self, keep: bool) -> Self {
        self.keep_sources = keep;
        self
    }

    /// Enables the debug table.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the extension mapping.
    pub fn with_extensions(mut self, extensions: ExtensionMap) -> Self {
        self.extensions = extensions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ExtensionRule;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.max_parallel_conversions, 1);
        assert!(!config.keep_sources);
        assert!(!config.debug);
        assert_eq!(config.extensions, ExtensionMap::default());
    }

    #[test]
    fn test_config_builder() {
        let config = ProcessorConfig::default()
            .with_max_parallel(4)
            .with_keep_sources(true)
            .with_debug(true)
            .with_extensions(ExtensionMap::new(vec![ExtensionRule::new("ppt", "odp")]));

        assert_eq!(config.max_parallel_conversions, 4);
        assert!(config.keep_sources);
        assert!(config.debug);
        assert_eq!(config.extensions.target_for("ppt"), Some("odp"));
    }
}
