//! Consultation sessions
//!
//! An explicitly owned registry, created at service start and passed by
//! reference, mapping an opaque session key to its backward-chaining
//! engine. Two keys never share working memory; the knowledge base they
//! read may be the same `Arc`.

mod errors;
mod registry;

pub use errors::{SessionError, SessionResult};
pub use registry::{SessionRegistry, SessionSummary};
