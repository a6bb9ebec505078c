//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "knowledge_dir": "./knowledge",
//!   "log_filter": "info",
//!   "http": { "host": "127.0.0.1", "port": 5000, "cors_origins": [] }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding variables.json, rules.json and facts.json
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: String,

    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_knowledge_dir() -> String {
    "./knowledge".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_dir: default_knowledge_dir(),
            log_filter: None,
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Load configuration, using defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.knowledge_dir.trim().is_empty() {
            return Err(CliError::config_error("knowledge_dir must not be empty"));
        }

        if let Some(filter) = &self.log_filter {
            EnvFilter::try_new(filter).map_err(|e| {
                CliError::config_error(format!("Invalid log_filter '{}': {}", filter, e))
            })?;
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    /// Get knowledge directory as Path
    pub fn knowledge_path(&self) -> &Path {
        Path::new(&self.knowledge_dir)
    }
}
