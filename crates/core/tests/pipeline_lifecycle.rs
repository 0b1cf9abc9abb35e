//! Pipeline lifecycle integration tests.
//!
//! These tests run the full pipeline with the mock converter against a
//! temporary folder:
//! - Mixed outcomes (converted, skipped, failed, ineligible)
//! - Idempotent re-runs
//! - Source cleanup only after confirmed conversions
//! - Fatal conditions (empty or unreadable folder)

use std::path::Path;

use tempfile::TempDir;

use odfmigrate_core::{
    processor::{ConvertPipeline, FailureKind, PipelineError, ProcessorConfig},
    testing::{fixtures, MockBehavior, MockConverter},
    LocalFs,
};

/// Test helper holding a pipeline and handles to its collaborators.
struct TestHarness {
    pipeline: ConvertPipeline<MockConverter, LocalFs>,
    converter: MockConverter,
    dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    fn with_config(config: ProcessorConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let converter = MockConverter::new();
        let pipeline = ConvertPipeline::new(config, converter.clone(), LocalFs::new());

        Self {
            pipeline,
            converter,
            dir,
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}

#[tokio::test]
async fn test_mixed_folder_scenario() {
    let harness = TestHarness::new();
    fixtures::populate(harness.path(), &[("a.doc", 500), ("b.xls", 300), ("c.doc", 700)]);
    // b.xls was converted before
    fixtures::write_file(harness.path(), "b.ods", 120);

    harness
        .converter
        .set_behavior("a.doc", MockBehavior::Succeed { output_size: 200 })
        .await;
    harness
        .converter
        .set_behavior("c.doc", MockBehavior::Fail { reason: "exit 1".to_string() })
        .await;

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();
    let summary = &outcome.summary;

    // b.ods is discovered too, as an ineligible file
    assert_eq!(summary.stats.total, 4);
    assert_eq!(summary.stats.eligible, 3);
    assert_eq!(summary.stats.processed, 1);
    assert_eq!(summary.stats.skipped, 1);
    assert_eq!(summary.stats.failed, 1);
    assert_eq!(summary.stats.source_bytes, 500);
    assert_eq!(summary.stats.target_bytes, 200);
    assert_eq!(summary.compression_percent, 60);
    assert_eq!(summary.deleted, 1);

    // Only the converted source is gone
    assert!(!harness.exists("a.doc"));
    assert!(harness.exists("a.odt"));
    assert!(harness.exists("b.xls"));
    assert!(harness.exists("c.doc"));
    assert!(!harness.exists("c.odt"));

    // The skipped file never reached the converter
    assert_eq!(harness.converter.conversion_count().await, 2);

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].source, harness.path().join("c.doc"));
}

#[tokio::test]
async fn test_ineligible_files_are_not_counted() {
    let harness = TestHarness::new();
    fixtures::populate(harness.path(), &[("notes.txt", 10), ("report.doc", 400)]);

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();
    let stats = outcome.summary.stats;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.eligible, 1);
    assert_eq!(stats.processed + stats.skipped + stats.failed, 1);

    let notes = &outcome.records[0];
    assert_eq!(notes.source, harness.path().join("notes.txt"));
    assert!(notes.target.is_none());
    assert!(harness.exists("notes.txt"));

    let report = &outcome.records[1];
    assert_eq!(report.target.as_deref(), Some(harness.path().join("report.odt").as_path()));
}

#[tokio::test]
async fn test_rerun_skips_previous_conversions() {
    let harness = TestHarness::with_config(ProcessorConfig::default().with_keep_sources(true));
    fixtures::populate(harness.path(), &[("a.doc", 500), ("b.xls", 300), ("c.doc", 100)]);
    harness
        .converter
        .set_behavior("c.doc", MockBehavior::Timeout)
        .await;

    let first = harness.pipeline.run(harness.path()).await.unwrap().summary;
    assert_eq!(first.stats.processed, 2);
    assert_eq!(first.stats.failed, 1);
    assert_eq!(first.deleted, 0);

    harness.converter.clear_recorded().await;
    let second = harness.pipeline.run(harness.path()).await.unwrap().summary;

    assert_eq!(second.stats.skipped, first.stats.processed);
    assert_eq!(second.stats.processed, 0);
    assert_eq!(second.stats.failed, first.stats.failed);

    // Only the failed file is attempted again
    let retried = harness.converter.recorded_conversions().await;
    assert_eq!(retried.len(), 1);
    assert_eq!(retried[0].job.input_path, harness.path().join("c.doc"));
}

#[tokio::test]
async fn test_missing_output_counts_as_failure() {
    let harness = TestHarness::new();
    fixtures::populate(harness.path(), &[("ghost.doc", 500), ("real.doc", 500)]);
    harness
        .converter
        .set_behavior("ghost.doc", MockBehavior::NoOutput)
        .await;

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();

    let ghost = &outcome.records[0];
    assert_eq!(ghost.failure, Some(FailureKind::OutputMissing));
    assert_eq!(ghost.target_size, 0);
    assert!(harness.exists("ghost.doc"));

    assert_eq!(outcome.summary.stats.processed, 1);
    assert_eq!(outcome.summary.stats.failed, 1);
    assert_eq!(outcome.summary.deleted, 1);
    assert!(!harness.exists("real.doc"));
}

#[tokio::test]
async fn test_sources_deleted_iff_converted() {
    let harness = TestHarness::with_config(ProcessorConfig::default().with_max_parallel(3));
    fixtures::populate(
        harness.path(),
        &[
            ("1.doc", 100),
            ("2.doc", 100),
            ("3.xls", 100),
            ("4.xls", 100),
            ("5.txt", 100),
        ],
    );
    fixtures::write_file(harness.path(), "4.ods", 10);
    harness
        .converter
        .set_behavior("2.doc", MockBehavior::Fail { reason: "corrupt".to_string() })
        .await;
    harness
        .converter
        .set_behavior("3.xls", MockBehavior::Succeed { output_size: 0 })
        .await;

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();

    for record in &outcome.records {
        assert_eq!(
            !record.source.exists(),
            record.target_size > 0,
            "unexpected cleanup result for {}",
            record.source.display()
        );
    }
    assert_eq!(outcome.summary.deleted, 1);
}

#[tokio::test]
async fn test_keep_sources() {
    let harness = TestHarness::with_config(ProcessorConfig::default().with_keep_sources(true));
    fixtures::populate(harness.path(), &[("a.doc", 500)]);

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();

    assert_eq!(outcome.summary.stats.processed, 1);
    assert_eq!(outcome.summary.deleted, 0);
    assert!(harness.exists("a.doc"));
    assert!(harness.exists("a.odt"));
}

#[tokio::test]
async fn test_empty_folder_halts() {
    let harness = TestHarness::new();

    let err = harness.pipeline.run(harness.path()).await.unwrap_err();

    assert!(matches!(err, PipelineError::NoInputFiles { .. }));
    assert_eq!(harness.converter.conversion_count().await, 0);
}

#[tokio::test]
async fn test_unreadable_folder_halts() {
    let harness = TestHarness::new();
    let missing = harness.path().join("does-not-exist");

    let err = harness.pipeline.run(&missing).await.unwrap_err();

    assert!(err.is_unreadable());
    assert_eq!(harness.converter.conversion_count().await, 0);
}

#[tokio::test]
async fn test_report_text_and_debug_table() {
    let harness = TestHarness::with_config(ProcessorConfig::default().with_debug(true));
    fixtures::populate(harness.path(), &[("a.doc", 1000)]);
    harness
        .converter
        .set_behavior("a.doc", MockBehavior::Succeed { output_size: 400 })
        .await;

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();
    let text = outcome.summary.render_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "Files in total: 1");
    assert_eq!(lines[4], "Processed data: 1000 B");
    assert_eq!(lines[5], "Converted data: 400 B");
    assert_eq!(lines[6], "Compression: 600 B (60%)");
    assert!(lines[7].starts_with("The operation has taken "));

    let table = outcome.debug_table.expect("debug table");
    assert_eq!(table.lines().count(), 3);
    assert!(table.lines().nth(2).unwrap().starts_with("1  doc"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_broken_entry_does_not_halt_run() {
    let harness = TestHarness::new();
    fixtures::populate(harness.path(), &[("a.doc", 500)]);
    std::os::unix::fs::symlink("loop", harness.path().join("loop")).unwrap();

    let outcome = harness.pipeline.run(harness.path()).await.unwrap();

    assert_eq!(outcome.summary.stats.total, 1);
    assert_eq!(outcome.summary.stats.processed, 1);
    assert!(harness.exists("a.odt"));
}
