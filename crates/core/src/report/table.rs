//! Per-file debug table.

use crate::processor::FileRecord;

use super::config::ReportConfig;

const HEADERS: [&str; 9] = [
    "#", "EXT1", "SOURCE", "SIZE1", "EXT2", "TARGET", "SIZE2", "SKIPPED", "FAILED",
];

/// Renders the records as an aligned text table.
///
/// At most `max_rows` rows are shown; with `from_end` the last ones. Row
/// numbers always refer to the position in the full record list.
pub fn render_debug_table(records: &[FileRecord], config: &ReportConfig) -> String {
    let max_rows = config.max_rows.max(1);
    let start = if records.len() > max_rows && config.from_end {
        records.len() - max_rows
    } else {
        0
    };
    let end = (start + max_rows).min(records.len());

    let rows: Vec<[String; 9]> = records[start..end]
        .iter()
        .enumerate()
        .map(|(offset, record)| {
            [
                (start + offset + 1).to_string(),
                record.source_ext.clone(),
                record.source.display().to_string(),
                record.source_size.to_string(),
                record.target_ext.clone(),
                record
                    .target
                    .as_ref()
                    .map(|t| t.display().to_string())
                    .unwrap_or_default(),
                record.target_size.to_string(),
                record.skipped.to_string(),
                record.is_failed().to_string(),
            ]
            .map(|cell| shorten(&cell, config.max_cell_width))
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(join_row(&HEADERS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(join_row(row, &widths));
    }
    if rows.len() < records.len() {
        lines.push(format!(
            "({} of {} rows shown)",
            rows.len(),
            records.len()
        ));
    }

    lines.join("\n")
}

fn join_row(cells: &[String; 9], widths: &[usize; 9]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Cuts a cell to `max` characters, keeping the end (the file name).
fn shorten(cell: &str, max: usize) -> String {
    let len = cell.chars().count();
    if len <= max || max < 4 {
        return cell.to_string();
    }
    let tail: String = cell.chars().skip(len - (max - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn records(count: usize) -> Vec<FileRecord> {
        (0..count)
            .map(|i| FileRecord::new(format!("/d/file{}.doc", i)))
            .collect()
    }

    #[test]
    fn test_header_and_rows() {
        let mut record = FileRecord::new("/d/a.doc");
        record.target = Some(PathBuf::from("/d/a.odt"));
        record.target_ext = "odt".to_string();
        record.source_size = 500;
        record.target_size = 200;

        let table = render_debug_table(&[record], &ReportConfig::default());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#  EXT1  SOURCE"));
        assert!(lines[0].ends_with("SKIPPED  FAILED"));
        assert!(lines[1].starts_with("-  ----"));
        assert!(lines[2].starts_with("1  doc   /d/a.doc"));
        assert!(lines[2].contains("/d/a.odt"));
        assert!(lines[2].ends_with("false    false"));
    }

    #[test]
    fn test_tail_is_shown_when_cut() {
        let config = ReportConfig {
            max_rows: 2,
            ..Default::default()
        };
        let table = render_debug_table(&records(5), &config);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("4 "));
        assert!(lines[3].starts_with("5 "));
        assert_eq!(lines[4], "(2 of 5 rows shown)");
    }

    #[test]
    fn test_head_is_shown_without_from_end() {
        let config = ReportConfig {
            max_rows: 2,
            from_end: false,
            ..Default::default()
        };
        let table = render_debug_table(&records(5), &config);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[2].starts_with("1 "));
        assert!(lines[3].starts_with("2 "));
    }

    #[test]
    fn test_shorten_keeps_tail() {
        assert_eq!(shorten("abcdef", 10), "abcdef");
        assert_eq!(shorten("/very/long/path/report.doc", 13), "...report.doc");
    }
}
