//! Filesystem access used by the conversion pipeline.
//!
//! The pipeline only needs a handful of operations, so they sit behind the
//! `FileSystem` trait and can be swapped out in tests.

mod local;
mod traits;

pub use local::LocalFs;
pub use traits::FileSystem;
