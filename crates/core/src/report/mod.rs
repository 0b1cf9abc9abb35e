//! Run statistics and their human-readable rendering.
//!
//! - `RunStats`: counts and byte totals aggregated from the final records
//! - `RunSummary`: the stats plus run metadata, rendered as text or JSON
//! - `render_debug_table`: the per-file table shown in debug mode

mod config;
mod format;
mod stats;
mod summary;
mod table;

pub use config::ReportConfig;
pub use format::{format_bytes, format_duration, format_signed_bytes};
pub use stats::{compression_percent, RunStats};
pub use summary::{FailedFile, RunSummary};
pub use table::render_debug_table;
