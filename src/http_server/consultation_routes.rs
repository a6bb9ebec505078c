//! Consultation HTTP Routes
//!
//! Backward-chaining consultations keyed by an opaque session name.
//!
//! - `POST /consultation/:session/start` `{ "goal": "..." }`
//! - `POST /consultation/:session/answer` `{ "variable": "...", "value": ... }`
//! - `DELETE /consultation/:session`
//! - `GET /consultation`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{RestError, RestResult};
use super::knowledge_routes::KnowledgeState;
use crate::inference::QueryOutcome;
use crate::session::{SessionError, SessionRegistry, SessionSummary};

// ==================
// Shared State
// ==================

/// Consultation state shared across handlers
pub struct ConsultationState {
    pub registry: Arc<SessionRegistry>,
    pub knowledge: Arc<KnowledgeState>,
}

impl ConsultationState {
    pub fn new(registry: Arc<SessionRegistry>, knowledge: Arc<KnowledgeState>) -> Self {
        Self { registry, knowledge }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct StartQueryRequest {
    pub goal: String,
}

// ==================
// Consultation Routes
// ==================

/// Create consultation routes
pub fn consultation_routes(state: Arc<ConsultationState>) -> Router {
    Router::new()
        .route("/consultation", get(list_sessions_handler))
        .route("/consultation/:session", delete(end_session_handler))
        .route("/consultation/:session/start", post(start_query_handler))
        .route("/consultation/:session/answer", post(submit_answer_handler))
        .with_state(state)
}

async fn start_query_handler(
    State(state): State<Arc<ConsultationState>>,
    Path(session): Path<String>,
    payload: Result<Json<StartQueryRequest>, JsonRejection>,
) -> RestResult<Json<QueryOutcome>> {
    let Json(request) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    if request.goal.trim().is_empty() {
        return Err(RestError::MissingField("goal".into()));
    }

    let kb = state.knowledge.snapshot()?;
    let outcome = state.registry.start_query(&session, kb, &request.goal)?;
    Ok(Json(outcome))
}

async fn submit_answer_handler(
    State(state): State<Arc<ConsultationState>>,
    Path(session): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<QueryOutcome>> {
    let Json(body) = payload.map_err(|e| RestError::InvalidBody(e.body_text()))?;

    // `value` may legitimately be null, but it must be present
    let variable = body
        .get("variable")
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| RestError::MissingField("variable".into()))?;
    let value = body
        .get("value")
        .cloned()
        .ok_or_else(|| RestError::MissingField("value".into()))?;

    let outcome = state.registry.submit_answer(&session, variable, value)?;
    Ok(Json(outcome))
}

async fn end_session_handler(
    State(state): State<Arc<ConsultationState>>,
    Path(session): Path<String>,
) -> RestResult<StatusCode> {
    if state.registry.end_session(&session)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SessionError::NotFound(session).into())
    }
}

async fn list_sessions_handler(
    State(state): State<Arc<ConsultationState>>,
) -> RestResult<Json<Vec<SessionSummary>>> {
    Ok(Json(state.registry.active_sessions()?))
}
