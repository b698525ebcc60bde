//! Quill: file-based content pipeline driven by remote LLM agents.
//!
//! This is the main entry point for the `quill` CLI. It loads `.env`, sets up
//! logging, parses arguments, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod pipeline;
pub mod prompt;
pub mod resolver;
pub mod runtime;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    // Respect `RUST_LOG` if set; logs go to stderr so stdout stays for summaries.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
