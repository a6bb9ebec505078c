//! Inference engine
//!
//! Two reasoning strategies over an immutable knowledge-base snapshot:
//!
//! - Backward chaining: resolves one goal variable, asking for values it
//!   cannot derive and propagating confidence factors
//! - Forward chaining: saturates a fact set to a fixed point, never asks
//!
//! # Invariants
//!
//! - Engines never write to the knowledge base; derived facts live in the
//!   engine's own working memory
//! - Condition evaluation is pure and fails closed
//! - A variable revisited on the resolution stack is unknown, never an error
//! - A variable with no fact and no successful rule produces a question
//! - One engine per consultation; engines are not shared between sessions

mod backward;
mod certainty;
mod condition;
mod errors;
mod forward;
mod outcome;

pub use backward::BackwardChainer;
pub use certainty::{combine, CERTAIN, UNKNOWN};
pub use condition::{as_number, evaluate};
pub use errors::{InferenceError, InferenceResult};
pub use forward::{ForwardChainer, ForwardOutcome};
pub use outcome::{ProofState, QueryOutcome, Question, SessionFact, Suspension};
