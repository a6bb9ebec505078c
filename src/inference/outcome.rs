//! Consultation outcomes
//!
//! A proof attempt ends in one of two records, told apart by `kind`:
//! a final result, or a question for a value the engine cannot derive.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A backward-chaining working-memory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFact {
    pub value: Value,
    pub cf: f64,
}

impl SessionFact {
    pub fn new(value: Value, cf: f64) -> Self {
        Self { value, cf }
    }

    /// A fact supplied by the knowledge base or by the user
    pub fn certain(value: Value) -> Self {
        Self::new(value, super::certainty::CERTAIN)
    }
}

/// Question raised when a variable cannot be derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub variable: String,
    pub question: String,
    pub explanation: String,
    /// First rule whose antecedents read the variable
    pub context_rule: Option<String>,
}

/// Typed interrupt that unwinds a proof attempt back to the caller.
///
/// It carries the question only. Everything needed to resume lives in the
/// engine's fact map and remembered goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Suspension {
    pub question: Question,
}

impl fmt::Display for Suspension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "awaiting a value for '{}'", self.question.variable)
    }
}

/// Outcome of `prove_goal` / `supply_answer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    Result {
        goal: String,
        value: Option<Value>,
        confidence: f64,
        fired_rules: Vec<String>,
    },
    Question(Question),
}

impl QueryOutcome {
    pub fn is_result(&self) -> bool {
        matches!(self, QueryOutcome::Result { .. })
    }

    pub fn is_question(&self) -> bool {
        matches!(self, QueryOutcome::Question(_))
    }

    /// The question, if the proof is suspended
    pub fn question(&self) -> Option<&Question> {
        match self {
            QueryOutcome::Question(q) => Some(q),
            QueryOutcome::Result { .. } => None,
        }
    }
}

/// Where a backward-chaining engine is in its proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofState {
    Idle,
    Proving,
    AwaitingAnswer,
    Resolved,
}

impl ProofState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofState::Idle => "idle",
            ProofState::Proving => "proving",
            ProofState::AwaitingAnswer => "awaiting_answer",
            ProofState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ProofState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
