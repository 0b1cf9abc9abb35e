//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use odfmigrate_core::Config;

#[derive(Debug, Parser)]
#[command(
    name = "odfmigrate",
    version,
    about = "Convert legacy .doc/.xls files in a folder to OpenDocument"
)]
pub struct Cli {
    /// Folder holding the documents to convert.
    #[arg(default_value = ".")]
    pub folder: PathBuf,

    /// Print the per-file table and log at debug level.
    #[arg(long)]
    pub debug: bool,

    /// TOML configuration file.
    #[arg(long, env = "ODFMIGRATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of conversions running at once.
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Timeout for a single conversion, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Keep the legacy files after converting them.
    #[arg(long)]
    pub keep_sources: bool,

    /// Path to the soffice binary.
    #[arg(long)]
    pub soffice: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Check that soffice can be started, then exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Overrides loaded configuration with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if self.debug {
            config.processor.debug = true;
        }
        if let Some(jobs) = self.jobs {
            config.processor.max_parallel_conversions = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.converter.timeout_secs = timeout;
        }
        if self.keep_sources {
            config.processor.keep_sources = true;
        }
        if let Some(ref soffice) = self.soffice {
            config.converter.soffice_path = soffice.clone();
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
