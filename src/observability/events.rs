//! Observable events
//!
//! Every lifecycle log line carries one of these as its `event` field, so
//! logs can be filtered by name regardless of message wording.

use std::fmt;

/// Observable events in the expert shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Knowledge base loaded from disk
    KnowledgeLoaded,
    /// Knowledge base snapshot replaced by an edit
    KnowledgeEdited,
    /// HTTP server listening
    Serving,
    /// Startup failed
    BootFailed,

    // Sessions
    /// New consultation started for a session key
    SessionStarted,
    /// Previous consultation for the key discarded
    SessionReplaced,
    /// Consultation removed
    SessionEnded,
    /// Answer submitted for an unknown session key
    SessionMissing,

    // Backward chaining
    /// Proof suspended on a question
    QuestionRaised,
    /// User answer recorded
    AnswerSupplied,
    /// Goal resolved to a final result
    GoalResolved,
    /// Variable revisited on the resolution stack
    CycleDetected,

    // Both engines
    /// Rule conclusion written to working memory
    RuleFired,

    // Forward chaining
    /// Saturation finished
    FixedPointReached,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::KnowledgeLoaded => "KNOWLEDGE_LOADED",
            Event::KnowledgeEdited => "KNOWLEDGE_EDITED",
            Event::Serving => "EXPERT_SERVING",
            Event::BootFailed => "BOOT_FAILED",

            Event::SessionStarted => "SESSION_STARTED",
            Event::SessionReplaced => "SESSION_REPLACED",
            Event::SessionEnded => "SESSION_ENDED",
            Event::SessionMissing => "SESSION_MISSING",

            Event::QuestionRaised => "QUESTION_RAISED",
            Event::AnswerSupplied => "ANSWER_SUPPLIED",
            Event::GoalResolved => "GOAL_RESOLVED",
            Event::CycleDetected => "CYCLE_DETECTED",

            Event::RuleFired => "RULE_FIRED",

            Event::FixedPointReached => "FIXED_POINT_REACHED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
