//! CLI argument parsing for quill.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::pipeline::Stage;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Quill: file-based content pipeline driven by remote LLM agents.
///
/// An outline file is turned into a published-quality post in three stages:
/// - draft: outline -> drafted
/// - validate: drafted -> validated (rewritten when claims look wrong)
/// - polish: validated -> polished
///
/// Each stage resolves its agent role and a scoped access token from the
/// entity directory, then invokes the agent runtime.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Working directory holding the artifacts.
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Pipeline file (default: quill.yaml in the working directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands for quill.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline.
    ///
    /// Runs draft, validate and polish in order, stopping at the first
    /// failure. Artifacts written by earlier stages are kept.
    Run(RunArgs),

    /// Turn the outline into a draft.
    Draft,

    /// Check the draft and rewrite it unless the agent answers `valid`.
    Validate,

    /// Polish the validated draft.
    Polish,

    /// Resolve an agent role and show what a stage would invoke.
    ///
    /// Prints the role's endpoint, model and system prompt and confirms a
    /// token was issued. The token itself is never printed.
    Resolve(ResolveArgs),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Stage to start from; its input artifact must already exist.
    #[arg(long, value_enum, default_value_t = Stage::Draft)]
    pub from: Stage,
}

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Role name (`data.agenttype`), e.g. `draftcontent`.
    pub role: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
