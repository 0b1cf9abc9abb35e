//! Conversion runner: one converter call per eligible, non-skipped record.

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::converter::{ConversionJob, Converter, ConverterError};
use crate::filesystem::FileSystem;

use super::types::{FailureKind, FileRecord, PipelineProgress};

/// Runs the converter for every record that needs it, at most
/// `max_parallel` at a time.
///
/// Results are written back once every conversion has finished, so each
/// record has a single writer. A failure never stops the other conversions.
/// Returns the number of attempted conversions.
pub async fn run_conversions<C, F>(
    converter: &C,
    fs: &F,
    records: &mut [FileRecord],
    max_parallel: usize,
    progress: Option<&mpsc::Sender<PipelineProgress>>,
) -> usize
where
    C: Converter + ?Sized,
    F: FileSystem + ?Sized,
{
    let jobs: Vec<(usize, ConversionJob)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.needs_conversion())
        .map(|(index, record)| {
            let job = ConversionJob::new(
                format!("{}", index + 1),
                record.source.clone(),
                &record.target_ext,
                record.folder.clone(),
            );
            (index, job)
        })
        .collect();

    let total = jobs.len();
    if total == 0 {
        info!("Nothing to convert");
        return 0;
    }
    info!(total, max_parallel, converter = converter.name(), "Starting conversions");

    let outcomes: Vec<(usize, Result<u64, FailureKind>)> = stream::iter(jobs.into_iter().enumerate())
        .map(|(position, (index, job))| {
            let target = records[index].target.clone();
            async move {
                let source = job.input_path.clone();
                send(progress, PipelineProgress::Converting {
                    source: source.clone(),
                    index: position + 1,
                    total,
                });

                let outcome = match converter.convert(job).await {
                    Ok(result) => {
                        // A missing output reads as 0; verification flags it later
                        let size = match target {
                            Some(ref path) => fs.file_size(path).await.unwrap_or(0),
                            None => 0,
                        };
                        debug!(
                            source = %source.display(),
                            target_size = size,
                            duration_ms = result.duration_ms,
                            "Conversion finished"
                        );
                        send(progress, PipelineProgress::Converted {
                            source: source.clone(),
                            target_size: size,
                        });
                        Ok(size)
                    }
                    Err(e) => {
                        log_failure(&source, &e);
                        let kind = FailureKind::from(&e);
                        send(progress, PipelineProgress::Failed {
                            source: source.clone(),
                            reason: kind.to_string(),
                        });
                        Err(kind)
                    }
                };
                (index, outcome)
            }
        })
        .buffer_unordered(max_parallel.max(1))
        .collect()
        .await;

    for (index, outcome) in outcomes {
        let record = &mut records[index];
        match outcome {
            Ok(size) => record.target_size = size,
            Err(kind) => record.mark_failed(kind),
        }
    }

    total
}

fn log_failure(source: &std::path::Path, err: &ConverterError) {
    match err {
        ConverterError::ConversionFailed {
            reason,
            stderr: Some(stderr),
        } => warn!(source = %source.display(), %reason, %stderr, "Conversion failed"),
        other => warn!(source = %source.display(), error = %other, "Conversion failed"),
    }
}

/// Non-blocking send; a slow or closed receiver never stalls conversions.
pub(crate) fn send(progress: Option<&mpsc::Sender<PipelineProgress>>, event: PipelineProgress) {
    if let Some(tx) = progress {
        let _ = tx.try_send(event);
    }
}
