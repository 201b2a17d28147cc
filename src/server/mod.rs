//! HTTP server for the answering engine
//!
//! Thin plumbing only: request parsing, CORS, tracing. All answering and
//! ingestion logic lives in [`AnswerEngine`].

pub mod routes;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::BotConfig;
use crate::engine::AnswerEngine;
use crate::error::{Error, Result};

/// Answering HTTP server.
pub struct BotServer {
    config: BotConfig,
    engine: AnswerEngine,
}

impl BotServer {
    pub fn new(config: BotConfig, engine: AnswerEngine) -> Self {
        Self { config, engine }
    }

    /// Build the router with all routes.
    fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .merge(routes::api_routes())
            .with_state(self.engine.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.server.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Start the server.
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting answering server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
