//! # Session Registry
//!
//! Holds at most one backward-chaining engine per session key. Starting a
//! query always creates a fresh engine and replaces whatever the key held.
//! Entries live until explicitly ended.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::errors::{SessionError, SessionResult};
use crate::inference::{BackwardChainer, ProofState, QueryOutcome};
use crate::knowledge::KnowledgeBase;
use crate::observability::Event;

struct SessionEntry {
    engine: BackwardChainer,
    started_at: DateTime<Utc>,
}

/// Public view of a registered consultation
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub key: String,
    pub goal: Option<String>,
    pub state: ProofState,
    pub fired_rules: usize,
    pub started_at: DateTime<Utc>,
}

/// Registry of active consultations
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
    /// Create a new registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a consultation for `key` against `kb`, replacing any previous
    /// one, and proves `goal`.
    pub fn start_query(
        &self,
        key: &str,
        kb: Arc<KnowledgeBase>,
        goal: &str,
    ) -> SessionResult<QueryOutcome> {
        let mut engine = BackwardChainer::new(kb);
        let outcome = engine.prove_goal(goal);

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Internal("Lock poisoned".into()))?;
        let previous = sessions.insert(
            key.to_string(),
            SessionEntry {
                engine,
                started_at: Utc::now(),
            },
        );

        if previous.is_some() {
            info!(event = %Event::SessionReplaced, session = key, goal, "consultation replaced");
        } else {
            info!(event = %Event::SessionStarted, session = key, goal, "consultation started");
        }
        Ok(outcome)
    }

    /// Feeds an answer to the consultation registered for `key`.
    pub fn submit_answer(&self, key: &str, variable: &str, value: Value) -> SessionResult<QueryOutcome> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Internal("Lock poisoned".into()))?;
        let entry = sessions.get_mut(key).ok_or_else(|| {
            warn!(event = %Event::SessionMissing, session = key, variable, "answer without consultation");
            SessionError::NotFound(key.to_string())
        })?;

        Ok(entry.engine.supply_answer(variable, value)?)
    }

    /// Removes the consultation for `key`. Returns whether one existed.
    pub fn end_session(&self, key: &str) -> SessionResult<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::Internal("Lock poisoned".into()))?;
        let removed = sessions.remove(key).is_some();
        if removed {
            info!(event = %Event::SessionEnded, session = key, "consultation ended");
        }
        Ok(removed)
    }

    /// Summaries of all registered consultations, ordered by key
    pub fn active_sessions(&self) -> SessionResult<Vec<SessionSummary>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionError::Internal("Lock poisoned".into()))?;
        let mut summaries: Vec<_> = sessions
            .iter()
            .map(|(key, entry)| SessionSummary {
                key: key.clone(),
                goal: entry.engine.goal().map(str::to_string),
                state: entry.engine.state(),
                fired_rules: entry.engine.fired_rules().len(),
                started_at: entry.started_at,
            })
            .collect();
        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(summaries)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
