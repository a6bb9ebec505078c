//! Observability HTTP Routes
//!
//! Health check reporting the served knowledge base and open consultations.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::consultation_routes::ConsultationState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rules: usize,
    pub variables: usize,
    pub sessions: usize,
}

/// Health check route
pub fn health_routes(state: Arc<ConsultationState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<ConsultationState>>) -> impl IntoResponse {
    let (rules, variables) = state
        .knowledge
        .snapshot()
        .map(|kb| (kb.rules().len(), kb.variables().len()))
        .unwrap_or((0, 0));

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules,
        variables,
        sessions: state.registry.len(),
    };

    (StatusCode::OK, Json(response))
}
