//! Forward-chaining HTTP Routes
//!
//! `POST /forward` `{ "facts": { "A": "1" } }` runs one saturation against
//! the current knowledge base and returns `{ facts, fired_rules }`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{RestError, RestResult};
use super::knowledge_routes::KnowledgeState;
use crate::inference::{ForwardChainer, ForwardOutcome};

#[derive(Debug, Deserialize)]
pub struct ForwardRequest {
    #[serde(default)]
    pub facts: BTreeMap<String, Value>,
}

/// Create forward-chaining routes
pub fn forward_routes(knowledge: Arc<KnowledgeState>) -> Router {
    Router::new()
        .route("/forward", post(forward_handler))
        .with_state(knowledge)
}

async fn forward_handler(
    State(knowledge): State<Arc<KnowledgeState>>,
    payload: Result<Json<ForwardRequest>, JsonRejection>,
) -> RestResult<Json<ForwardOutcome>> {
    let Json(request) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;

    let mut engine = ForwardChainer::new(knowledge.snapshot()?);
    for (variable, value) in request.facts {
        engine.add_fact(variable, value);
    }
    Ok(Json(engine.run_to_fixed_point()))
}
