mod args;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odfmigrate_core::{
    load_config, load_config_from_env, validate_config, Config, ConvertPipeline, Converter,
    LocalFs, PipelineError, PipelineProgress, SofficeConverter,
};

use args::Cli;

/// Buffer size for progress events
const PROGRESS_BUFFER_SIZE: usize = 256;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = load(&cli)?;
    cli.apply(&mut config);
    validate_config(&config).context("Configuration validation failed")?;

    let converter = SofficeConverter::new(config.converter.clone());

    if cli.check {
        converter
            .validate()
            .await
            .context("soffice is not usable")?;
        let version = converter.version().await?;
        println!(
            "{} {}",
            converter.config().soffice_path.display(),
            version
        );
        return Ok(());
    }

    let folder = std::path::absolute(&cli.folder)
        .with_context(|| format!("Invalid folder {:?}", cli.folder))?;
    info!("Converting documents in {:?}", folder);
    info!(
        "Max parallel conversions: {}, timeout: {}s",
        config.processor.max_parallel_conversions, config.converter.timeout_secs
    );

    let (progress_tx, progress_rx) = mpsc::channel(PROGRESS_BUFFER_SIZE);
    let progress_handle = tokio::spawn(log_progress(progress_rx));

    let pipeline = ConvertPipeline::new(config.processor.clone(), converter, LocalFs::new())
        .with_report_config(config.report.clone())
        .with_progress(progress_tx);

    let result = pipeline.run(&folder).await;

    // Closing the channel lets the progress task finish
    drop(pipeline);
    if let Err(e) = progress_handle.await {
        warn!("Progress task failed: {}", e);
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(PipelineError::NoInputFiles { path }) => {
            println!("No files found in {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // With --json, stdout holds only the JSON document
    if let Some(table) = outcome.debug_table {
        if cli.json {
            eprintln!("{}\n", table);
        } else {
            println!("{}\n", table);
        }
    }

    if cli.json {
        let json = outcome
            .summary
            .to_json()
            .context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        println!("{}", outcome.summary.render_text());
    }

    for failure in &outcome.summary.failures {
        warn!("Not converted: {} ({})", failure.source.display(), failure.reason);
    }

    Ok(())
}

/// Loads the configuration file if one was given, else defaults plus environment.
fn load(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_config_from_env().context("Failed to load configuration from environment"),
    }
}

async fn log_progress(mut rx: mpsc::Receiver<PipelineProgress>) {
    while let Some(event) = rx.recv().await {
        match event {
            PipelineProgress::Discovered {
                total_files,
                eligible,
                skipped,
            } => {
                info!(
                    "Found {} files, {} convertible, {} already converted",
                    total_files, eligible, skipped
                );
            }
            PipelineProgress::Converting {
                source,
                index,
                total,
            } => {
                info!("[{}/{}] Converting {}", index, total, file_name(&source));
            }
            PipelineProgress::Converted {
                source,
                target_size,
            } => {
                debug!("Converted {} ({} bytes)", file_name(&source), target_size);
            }
            PipelineProgress::Failed { source, reason } => {
                warn!("Failed to convert {}: {}", file_name(&source), reason);
            }
            PipelineProgress::Finished { .. } => {}
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
