//! Knowledge HTTP Routes
//!
//! Read and edit the served knowledge base. Every edit builds a new
//! snapshot and swaps it in; consultations already running keep the
//! snapshot they started with.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use tracing::info;

use super::errors::{RestError, RestResult};
use crate::knowledge::{KnowledgeBase, KnowledgeResult, Rule, Variable};
use crate::observability::Event;

// ==================
// Shared State
// ==================

/// The knowledge base currently served
pub struct KnowledgeState {
    current: RwLock<Arc<KnowledgeBase>>,
}

impl KnowledgeState {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            current: RwLock::new(Arc::new(kb)),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> RestResult<Arc<KnowledgeBase>> {
        self.current
            .read()
            .map(|kb| Arc::clone(&*kb))
            .map_err(|_| RestError::Internal("Lock poisoned".into()))
    }

    /// Applies a copy-on-write edit and publishes the result.
    pub fn edit<F>(&self, what: &str, f: F) -> RestResult<Arc<KnowledgeBase>>
    where
        F: FnOnce(&KnowledgeBase) -> KnowledgeResult<KnowledgeBase>,
    {
        let mut current = self
            .current
            .write()
            .map_err(|_| RestError::Internal("Lock poisoned".into()))?;
        let next = Arc::new(f(&**current)?);
        *current = Arc::clone(&next);
        info!(
            event = %Event::KnowledgeEdited,
            edit = what,
            rules = next.rules().len(),
            variables = next.variables().len(),
            "knowledge base replaced"
        );
        Ok(next)
    }
}

impl Default for KnowledgeState {
    fn default() -> Self {
        Self::new(KnowledgeBase::new())
    }
}

// ==================
// Knowledge Routes
// ==================

/// Create knowledge routes
pub fn knowledge_routes(state: Arc<KnowledgeState>) -> Router {
    Router::new()
        .route("/knowledge", get(get_knowledge_handler))
        .route(
            "/knowledge/rules",
            get(list_rules_handler).post(create_rule_handler),
        )
        .route(
            "/knowledge/rules/:name",
            put(update_rule_handler).delete(delete_rule_handler),
        )
        .route(
            "/knowledge/variables",
            get(list_variables_handler).post(create_variable_handler),
        )
        .route(
            "/knowledge/variables/:name",
            delete(delete_variable_handler),
        )
        .with_state(state)
}

async fn get_knowledge_handler(
    State(state): State<Arc<KnowledgeState>>,
) -> RestResult<Json<KnowledgeBase>> {
    let kb = state.snapshot()?;
    Ok(Json(kb.as_ref().clone()))
}

// ==================
// Rule Handlers
// ==================

async fn list_rules_handler(State(state): State<Arc<KnowledgeState>>) -> RestResult<Json<Vec<Rule>>> {
    Ok(Json(state.snapshot()?.rules().to_vec()))
}

async fn create_rule_handler(
    State(state): State<Arc<KnowledgeState>>,
    payload: Result<Json<Rule>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Rule>)> {
    let Json(rule) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    state.edit("create_rule", |kb| kb.with_rule(rule.clone()))?;
    Ok((StatusCode::CREATED, Json(rule)))
}

async fn update_rule_handler(
    State(state): State<Arc<KnowledgeState>>,
    Path(name): Path<String>,
    payload: Result<Json<Rule>, JsonRejection>,
) -> RestResult<Json<Rule>> {
    let Json(rule) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    state.edit("update_rule", |kb| kb.replacing_rule(&name, rule.clone()))?;
    Ok(Json(rule))
}

async fn delete_rule_handler(
    State(state): State<Arc<KnowledgeState>>,
    Path(name): Path<String>,
) -> RestResult<StatusCode> {
    state.edit("delete_rule", |kb| kb.without_rule(&name))?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Variable Handlers
// ==================

async fn list_variables_handler(
    State(state): State<Arc<KnowledgeState>>,
) -> RestResult<Json<Vec<Variable>>> {
    Ok(Json(state.snapshot()?.variables().values().cloned().collect()))
}

async fn create_variable_handler(
    State(state): State<Arc<KnowledgeState>>,
    payload: Result<Json<Variable>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Variable>)> {
    let Json(variable) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    state.edit("create_variable", |kb| kb.with_variable(variable.clone()))?;
    Ok((StatusCode::CREATED, Json(variable)))
}

async fn delete_variable_handler(
    State(state): State<Arc<KnowledgeState>>,
    Path(name): Path<String>,
) -> RestResult<StatusCode> {
    state.edit("delete_variable", |kb| kb.without_variable(&name))?;
    Ok(StatusCode::NO_CONTENT)
}
