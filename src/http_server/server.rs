//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::consultation_routes::{consultation_routes, ConsultationState};
use super::forward_routes::forward_routes;
use super::knowledge_routes::{knowledge_routes, KnowledgeState};
use super::observability_routes::health_routes;
use crate::knowledge::KnowledgeBase;
use crate::observability::Event;
use crate::session::SessionRegistry;

/// HTTP Server for the expert shell
pub struct HttpServer {
    config: HttpServerConfig,
    registry: Arc<SessionRegistry>,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration over `kb`
    pub fn new(kb: KnowledgeBase) -> Self {
        Self::with_config(HttpServerConfig::default(), kb)
    }

    /// Create a server with custom configuration over `kb`
    pub fn with_config(config: HttpServerConfig, kb: KnowledgeBase) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let router = Self::build_router(&config, Arc::clone(&registry), kb);
        Self {
            config,
            registry,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        registry: Arc<SessionRegistry>,
        kb: KnowledgeBase,
    ) -> Router {
        let knowledge = Arc::new(KnowledgeState::new(kb));
        let consultation = Arc::new(ConsultationState::new(registry, Arc::clone(&knowledge)));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(Arc::clone(&consultation)))
            .merge(consultation_routes(consultation))
            .merge(forward_routes(Arc::clone(&knowledge)))
            .merge(knowledge_routes(knowledge))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The registry owned by this server
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = %Event::Serving, %addr, "expert shell listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
