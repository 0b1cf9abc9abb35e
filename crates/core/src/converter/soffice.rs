//! LibreOffice (`soffice`) based converter implementation.

use async_trait::async_trait;
use regex_lite::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionJob, ConversionResult};

/// Converter that shells out to a headless LibreOffice.
pub struct SofficeConverter {
    config: ConverterConfig,
}

impl SofficeConverter {
    /// Creates a new converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Builds soffice arguments for one conversion.
    ///
    /// `--outdir` is always passed: without it soffice writes into its own
    /// working directory.
    fn build_args(&self, job: &ConversionJob, profile_dir: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if let Some(dir) = profile_dir {
            args.push(format!("-env:UserInstallation={}", file_url(dir)).into());
        }

        args.extend([
            OsString::from("--headless"),
            OsString::from("--convert-to"),
            OsString::from(&job.target_format),
            OsString::from("--outdir"),
            job.output_dir.as_os_str().to_os_string(),
        ]);

        args.extend(self.config.extra_args.iter().map(OsString::from));

        // Input goes last, byte for byte
        args.push(job.input_path.as_os_str().to_os_string());

        args
    }

    /// Extracts the version number from `soffice --version` output.
    pub fn parse_version(output: &str) -> Option<String> {
        let re = Regex::new(r"(?:LibreOffice|OpenOffice|Collabora Office)\S*\s+(\d+(?:\.\d+)+)")
            .ok()?;
        re.captures(output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Queries the installed soffice version.
    pub async fn version(&self) -> Result<String, ConverterError> {
        let output = Command::new(&self.config.soffice_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_version(&stdout).ok_or_else(|| ConverterError::UnknownVersion {
            output: stdout.trim().to_string(),
        })
    }

    fn spawn_error(&self, e: std::io::Error) -> ConverterError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConverterError::BinaryNotFound {
                path: self.config.soffice_path.clone(),
            }
        } else {
            ConverterError::Io(e)
        }
    }

    fn profile_dir(&self) -> Option<PathBuf> {
        self.config
            .isolated_profiles
            .then(|| self.config.temp_dir.join(format!("profile-{}", Uuid::new_v4())))
    }

    async fn run_conversion(&self, job: &ConversionJob) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if !tokio::fs::try_exists(&job.input_path).await.unwrap_or(false) {
            return Err(ConverterError::InputNotFound {
                path: job.input_path.clone(),
            });
        }
        if !tokio::fs::try_exists(&job.output_dir).await.unwrap_or(false) {
            return Err(ConverterError::OutputDirectoryMissing {
                path: job.output_dir.clone(),
            });
        }

        let profile_dir = self.profile_dir();
        if profile_dir.is_some() {
            tokio::fs::create_dir_all(&self.config.temp_dir).await?;
        }
        let args = self.build_args(job, profile_dir.as_deref());
        debug!(job_id = %job.job_id, ?args, "Launching soffice");

        // kill_on_drop reaps the child when the timeout drops the wait future
        let child = Command::new(&self.config.soffice_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, child.wait_with_output()).await;

        if let Some(dir) = profile_dir {
            if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %dir.display(), error = %e, "Failed to remove soffice profile");
                }
            }
        }

        match result {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    return Err(ConverterError::conversion_failed(
                        format!("soffice exited with code: {:?}", output.status.code()),
                        if stderr.is_empty() { None } else { Some(stderr) },
                    ));
                }
            }
            Ok(Err(e)) => return Err(ConverterError::Io(e)),
            Err(_) => {
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        }

        Ok(ConversionResult {
            job_id: job.job_id.clone(),
            output_path: job.expected_output(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Formats a directory as the `file://` URL soffice expects for `UserInstallation`.
fn file_url(dir: &Path) -> String {
    let path = dir.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

#[async_trait]
impl Converter for SofficeConverter {
    fn name(&self) -> &str {
        "soffice"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        let version = self.version().await?;
        info!(
            path = %self.config.soffice_path.display(),
            version = %version,
            "Found converter"
        );

        if self.config.isolated_profiles {
            tokio::fs::create_dir_all(&self.config.temp_dir).await?;
        }

        Ok(())
    }
}
