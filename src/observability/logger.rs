//! Log subscriber setup
//!
//! One subscriber per process, installed by the CLI before anything else
//! runs. `RUST_LOG` wins over the configured filter.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config provides one
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter: `RUST_LOG` if set, else `configured`, else `info`.
pub fn build_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global fmt subscriber, writing to stderr.
///
/// Returns false if a subscriber was already installed.
pub fn init(configured: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
