//! # HTTP Server Module
//!
//! JSON transport over the inference engine. Translates requests into
//! `prove_goal` / `supply_answer` calls on the session registry, runs
//! forward chaining, and edits the served knowledge base.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/consultation/*` - Backward-chaining consultations
//! - `/forward` - Forward chaining
//! - `/knowledge/*` - Rules and variables

pub mod config;
pub mod consultation_routes;
pub mod errors;
pub mod forward_routes;
pub mod knowledge_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{RestError, RestResult};
pub use knowledge_routes::KnowledgeState;
pub use server::HttpServer;
