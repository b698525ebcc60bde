//! Command implementations for quill.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod resolve;
mod run;

use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::Config;
use crate::error::{QuillError, Result};
use crate::pipeline::Stage;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli.global)?;
    match cli.command {
        Command::Run(args) => run::cmd_run(&config, args.from),
        Command::Draft => run::cmd_stage(&config, Stage::Draft),
        Command::Validate => run::cmd_stage(&config, Stage::Validate),
        Command::Polish => run::cmd_stage(&config, Stage::Polish),
        Command::Resolve(args) => resolve::cmd_resolve(&config, &args.role),
    }
}

/// Build the run configuration for the selected working directory.
fn load_config(global: &GlobalArgs) -> Result<Config> {
    if !global.dir.is_dir() {
        return Err(QuillError::Config(format!(
            "working directory '{}' does not exist",
            global.dir.display()
        )));
    }
    Config::load(&global.dir, global.config.as_deref())
}
