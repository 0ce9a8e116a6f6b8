//! Command Line Interface (CLI) layer for doc-template.
//!
//! This module defines argument parsing (`args`), including the legacy
//! single-dash flag spelling, and the orchestration entry (`runner`) that
//! installs logging and hands the run options to `doc_template::api`.
//!
//! If you are embedding doc-template into another application, prefer using
//! the library API instead of calling the CLI code.
pub mod args;
pub mod runner;

pub use args::{CliArgs, normalize_flags};
pub use runner::run;
