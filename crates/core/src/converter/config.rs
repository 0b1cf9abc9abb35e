//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the LibreOffice-based converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to the soffice binary.
    #[serde(default = "default_soffice_path")]
    pub soffice_path: PathBuf,

    /// Timeout for a single conversion in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Give every conversion its own throw-away user profile.
    ///
    /// Concurrent soffice instances sharing one profile wait on each other's lock.
    #[serde(default = "default_isolated_profiles")]
    pub isolated_profiles: bool,

    /// Directory holding the throw-away profiles.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Additional arguments passed to soffice before the input file.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_soffice_path() -> PathBuf {
    PathBuf::from("soffice")
}

fn default_timeout() -> u64 {
    600 // 10 minutes
}

fn default_isolated_profiles() -> bool {
    true
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("odfmigrate")
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            soffice_path: default_soffice_path(),
            timeout_secs: default_timeout(),
            isolated_profiles: default_isolated_profiles(),
            temp_dir: default_temp_dir(),
            extra_args: Vec::new(),
        }
    }
}

impl ConverterConfig {
    /// Creates a new config with a custom soffice path.
    pub fn with_path(soffice_path: PathBuf) -> Self {
        Self {
            soffice_path,
            ..Default::default()
        }
    }

    /// Sets the temp directory.
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Enables or disables per-conversion profiles.
    pub fn with_isolated_profiles(mut self, isolated: bool) -> Self {
        self.isolated_profiles = isolated;
        self
    }
}
