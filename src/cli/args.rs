//! CLI argument definitions using clap
//!
//! Commands:
//! - expert-shell serve --config <path> [--port <port>]
//! - expert-shell ask --config <path> --goal <variable>
//! - expert-shell forward --config <path> --facts <json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rule-based expert-system shell
#[derive(Parser, Debug)]
#[command(name = "expert-shell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve consultations over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./expert.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run an interactive backward-chaining consultation on the terminal
    Ask {
        /// Path to configuration file
        #[arg(long, default_value = "./expert.json")]
        config: PathBuf,

        /// Goal variable to prove
        #[arg(long)]
        goal: String,
    },

    /// Run forward chaining once and print the saturated facts
    Forward {
        /// Path to configuration file
        #[arg(long, default_value = "./expert.json")]
        config: PathBuf,

        /// Initial facts as a JSON object
        #[arg(long, default_value = "{}")]
        facts: String,
    },
}
