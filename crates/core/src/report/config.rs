//! Configuration for the report module.

use serde::{Deserialize, Serialize};

/// Limits for the debug table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum number of table rows shown.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Maximum characters per table cell.
    #[serde(default = "default_max_cell_width")]
    pub max_cell_width: usize,

    /// Show the last rows instead of the first when the table is cut.
    #[serde(default = "default_from_end")]
    pub from_end: bool,
}

fn default_max_rows() -> usize {
    1000
}

fn default_max_cell_width() -> usize {
    30
}

fn default_from_end() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            max_cell_width: default_max_cell_width(),
            from_end: default_from_end(),
        }
    }
}
