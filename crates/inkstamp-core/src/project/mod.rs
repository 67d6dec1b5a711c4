//! Project files: a serializable description of one watermark job.

pub mod config;
mod runner;

pub use runner::{build_editor, run_batch, run_project, ProjectOutput};
