//! Testing utilities and mock implementations.
//!
//! `MockConverter` stands in for soffice so the whole pipeline can run
//! against a temporary directory without LibreOffice installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use odfmigrate_core::testing::{fixtures, MockBehavior, MockConverter};
//!
//! let dir = tempfile::TempDir::new()?;
//! fixtures::write_file(dir.path(), "a.doc", 500);
//!
//! let converter = MockConverter::new();
//! converter.set_behavior("a.doc", MockBehavior::Succeed { output_size: 200 }).await;
//! ```

mod mock_converter;

pub use mock_converter::{MockBehavior, MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    /// Writes a file of `size` bytes into `dir` and returns its path.
    pub fn write_file(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        if let Err(e) = std::fs::write(&path, vec![0x42u8; size]) {
            panic!("failed to write fixture {}: {}", path.display(), e);
        }
        path
    }

    /// Writes every `(name, size)` pair into `dir`.
    pub fn populate(dir: &Path, files: &[(&str, usize)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, size)| write_file(dir, name, *size))
            .collect()
    }
}
