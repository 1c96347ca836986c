//! End-to-end orchestration: the import pipeline, output writer, and
//! navigation rendering glue.

pub mod nav;
pub mod pipeline;
pub mod writer;

pub use nav::render_nav;
pub use pipeline::{ImportConfig, ImportReport, ProgressReporter, SilentProgress, run_import};
pub use writer::{OutputPage, WriteConfig, WriteResult, validate_output, write_output};
