//! expert-shell entry point
//!
//! Parses arguments, dispatches to the CLI and exits non-zero on failure.
//! Configuration, logging and the knowledge base are all set up by the
//! CLI commands, never here.

use expert_shell::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
