//! The conversion pipeline: discovery through reporting.

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::converter::Converter;
use crate::filesystem::FileSystem;
use crate::report::{render_debug_table, ReportConfig, RunSummary};

use super::cleanup::remove_converted_sources;
use super::config::ProcessorConfig;
use super::discovery::discover;
use super::error::PipelineError;
use super::resolver::resolve_targets;
use super::runner::{run_conversions, send};
use super::types::{FileRecord, PipelineProgress};
use super::verifier::verify_outputs;

/// What a completed run leaves behind.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: RunSummary,
    /// Final records in discovery order.
    pub records: Vec<FileRecord>,
    /// Rendered table, present only in debug mode.
    pub debug_table: Option<String>,
}

/// Converts every legacy document in a folder.
///
/// Stages run in a fixed order and are never retried:
/// discovery, target resolution, conversion, verification, cleanup, report.
pub struct ConvertPipeline<C: Converter, F: FileSystem> {
    config: ProcessorConfig,
    report_config: ReportConfig,
    converter: Arc<C>,
    fs: Arc<F>,
    progress_tx: Option<mpsc::Sender<PipelineProgress>>,
}

impl<C: Converter, F: FileSystem> ConvertPipeline<C, F> {
    /// Creates a new pipeline.
    pub fn new(config: ProcessorConfig, converter: C, fs: F) -> Self {
        Self {
            config,
            report_config: ReportConfig::default(),
            converter: Arc::new(converter),
            fs: Arc::new(fs),
            progress_tx: None,
        }
    }

    /// Sets the debug table limits.
    pub fn with_report_config(mut self, report_config: ReportConfig) -> Self {
        self.report_config = report_config;
        self
    }

    /// Sends progress events to `tx`. Events are dropped if the channel is full.
    pub fn with_progress(mut self, tx: mpsc::Sender<PipelineProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Runs every stage against `folder`.
    ///
    /// Fails only when the folder is unreadable or empty; per-file problems
    /// are recorded in the outcome.
    pub async fn run(&self, folder: &Path) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("convert", %run_id, folder = %folder.display());
        self.run_stages(run_id, folder).instrument(span).await
    }

    async fn run_stages(&self, run_id: Uuid, folder: &Path) -> Result<PipelineOutcome, PipelineError> {
        let started_at = Utc::now();
        let timer = Instant::now();
        let progress = self.progress_tx.as_ref();

        let mut records = discover(&*self.fs, folder).await?;

        let eligible = resolve_targets(&*self.fs, &mut records, &self.config.extensions).await;
        send(
            progress,
            PipelineProgress::Discovered {
                total_files: records.len(),
                eligible,
                skipped: records.iter().filter(|r| r.skipped).count(),
            },
        );

        run_conversions(
            &*self.converter,
            &*self.fs,
            &mut records,
            self.config.max_parallel_conversions,
            progress,
        )
        .await;

        verify_outputs(&*self.fs, &mut records).await;

        let deleted = if self.config.keep_sources {
            info!("Keeping source files");
            0
        } else {
            remove_converted_sources(&*self.fs, &records).await
        };

        let debug_table = self
            .config
            .debug
            .then(|| render_debug_table(&records, &self.report_config));

        let summary = RunSummary::new(
            run_id,
            folder,
            started_at,
            timer.elapsed(),
            &records,
            deleted,
        );
        send(
            progress,
            PipelineProgress::Finished {
                processed: summary.stats.processed,
                skipped: summary.stats.skipped,
                failed: summary.stats.failed,
            },
        );
        info!(
            processed = summary.stats.processed,
            skipped = summary.stats.skipped,
            failed = summary.stats.failed,
            deleted,
            elapsed_ms = summary.elapsed_ms,
            "Run complete"
        );

        Ok(PipelineOutcome {
            summary,
            records,
            debug_table,
        })
    }
}
