//! Observability subsystem
//!
//! Structured logging through `tracing`:
//! - Lifecycle lines carry an `event` field naming an [`Event`]
//! - Engines log rule firings at `debug`, cycles at `trace`
//! - Observability never changes an inference outcome
//!
//! # Usage
//!
//! ```ignore
//! use expert_shell::observability::{self, Event};
//!
//! observability::init(Some("info"));
//! tracing::info!(event = %Event::KnowledgeLoaded, rules = 12, "knowledge loaded");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{build_filter, init, DEFAULT_FILTER};
