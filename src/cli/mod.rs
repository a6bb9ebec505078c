//! Command-line interface
//!
//! - serve: HTTP consultations over the loaded knowledge base
//! - ask: interactive backward chaining on the terminal
//! - forward: one-shot forward chaining over JSON facts

mod args;
mod commands;
mod config;
mod errors;
mod io;

use std::ffi::OsString;

use clap::Parser;

pub use args::{Cli, Command};
pub use commands::{ask, consult, forward, run_command, saturate, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_from(std::env::args_os())
}

/// Parse `args` (program name first) and run the selected command.
///
/// `--help` and `--version` print and return `Ok`.
pub fn run_from<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(CliError::input_error(e.to_string())),
    };
    run_command(cli.command)
}
