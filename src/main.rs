//! doc-template CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, resolve and
//! render the configured templates, and exit with appropriate status.
//! For programmatic use, prefer the library API (`doc_template::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse_from(cli::normalize_flags(std::env::args_os()));
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
