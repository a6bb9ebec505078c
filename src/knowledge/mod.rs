//! Knowledge-base subsystem
//!
//! Declares what the engines reason over:
//! - Variables with kind, allowed values, bounds and question text
//! - Conditions `(variable, operator, value)` with a confidence factor
//! - Rules with ordered antecedents and conclusions
//! - Initial facts
//!
//! # Invariants
//!
//! - Rule and variable names are unique within a knowledge base
//! - A snapshot is never mutated once handed to an engine
//! - Conditions may name variables that are not declared

mod base;
mod errors;
mod loader;
mod types;

pub use base::KnowledgeBase;
pub use errors::{KnowledgeError, KnowledgeResult};
pub use loader::{KnowledgeLoader, FACTS_FILE, RULES_FILE, VARIABLES_FILE};
pub use types::{Condition, Operator, Rule, Variable, VariableKind};
